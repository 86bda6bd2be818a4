//! Bill payloads as returned by the card issuer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Lifecycle state of a bill
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillState {
    /// Current cycle, still accepting charges
    Open,
    /// Closed and awaiting payment
    Closed,
    /// Closed and past its due date
    Overdue,
    /// Upcoming cycle holding installments
    Future,
    #[serde(other)]
    Unknown,
}

/// Entry of the issuer's bill listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillListing {
    /// Issuer identifier used to request the bill detail
    pub id: String,
    pub state: BillState,
}

impl BillListing {
    /// Create a new bill listing entry
    pub fn new(id: impl Into<String>, state: BillState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }

    /// Whether this bill is the open one
    pub fn is_open(&self) -> bool {
        self.state == BillState::Open
    }
}

/// Full detail of one bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDetail {
    pub bill: BillBody,
}

/// Body of a bill detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillBody {
    pub summary: BillSummary,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
}

/// Bill summary figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Close date as reported by the issuer (`YYYY-MM-DD`)
    pub close_date: String,
}

/// Line item exactly as listed on the bill
///
/// Rows without `charges` are not purchases (payments received, adjustments)
/// and never become [`PostedTransaction`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub title: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub post_date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub charges: Option<u32>,
}

impl BillDetail {
    /// Create a bill detail from its close date and line items
    pub fn new(close_date: impl Into<String>, line_items: Vec<RawLineItem>) -> Self {
        Self {
            bill: BillBody {
                summary: BillSummary {
                    close_date: close_date.into(),
                },
                line_items,
            },
        }
    }

    /// Parse the bill close date with the given chrono format
    pub fn close_date(&self, format: &str) -> ReconcileResult<NaiveDate> {
        let raw = &self.bill.summary.close_date;
        NaiveDate::parse_from_str(raw, format)
            .map_err(|e| ReconcileError::Parse(format!("Invalid bill close date '{}': {}", raw, e)))
    }

    /// Line items
    pub fn line_items(&self) -> &[RawLineItem] {
        &self.bill.line_items
    }
}

impl RawLineItem {
    /// Create a raw line item
    pub fn new(
        title: impl Into<String>,
        amount: i64,
        post_date: impl Into<String>,
        category: Option<String>,
        charges: Option<u32>,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            post_date: post_date.into(),
            category,
            charges,
        }
    }

    /// Whether the row represents an actual charge
    pub fn is_charge(&self) -> bool {
        self.charges.is_some()
    }

    /// Convert into a posted transaction, or `None` for rows without charges
    pub fn to_posted(&self, date_format: &str) -> ReconcileResult<Option<PostedTransaction>> {
        let Some(charges) = self.charges else {
            return Ok(None);
        };

        let post_date = NaiveDate::parse_from_str(&self.post_date, date_format).map_err(|e| {
            ReconcileError::Parse(format!(
                "Invalid post date '{}' for line item '{}': {}",
                self.post_date, self.title, e
            ))
        })?;

        Ok(Some(PostedTransaction::new(
            self.title.clone(),
            self.amount,
            post_date,
            self.category.clone().unwrap_or_default(),
            charges,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BILL_DATE_FORMAT;

    #[test]
    fn test_bill_detail_deserializes_issuer_payload() {
        let payload = serde_json::json!({
            "bill": {
                "state": "open",
                "summary": {"close_date": "2024-01-15", "total_balance": 123456},
                "line_items": [
                    {"title": "Rent", "amount": 100000, "post_date": "2024-01-02",
                     "category": "housing", "charges": 1, "index": 0},
                    {"title": "Pagamento recebido", "amount": -50000, "post_date": "2024-01-03"}
                ]
            }
        });

        let detail: BillDetail = serde_json::from_value(payload).unwrap();
        assert_eq!(detail.line_items().len(), 2);
        assert!(detail.line_items()[0].is_charge());
        assert!(!detail.line_items()[1].is_charge());
        assert_eq!(
            detail.close_date(BILL_DATE_FORMAT).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_bill_state_unknown_values() {
        let listing: BillListing =
            serde_json::from_value(serde_json::json!({"id": "b1", "state": "archived"})).unwrap();
        assert_eq!(listing.state, BillState::Unknown);
        assert!(!listing.is_open());
    }

    #[test]
    fn test_invalid_close_date_is_parse_error() {
        let detail = BillDetail::new("15/01/2024", vec![]);
        let err = detail.close_date(BILL_DATE_FORMAT).unwrap_err();
        assert!(matches!(err, ReconcileError::Parse(_)));
    }

    #[test]
    fn test_line_item_without_charges_is_skipped() {
        let item = RawLineItem::new("Pagamento recebido", -5000, "2024-01-03", None, None);
        assert_eq!(item.to_posted(BILL_DATE_FORMAT).unwrap(), None);
    }

    #[test]
    fn test_blank_title_charge_is_kept() {
        let item = RawLineItem::new("", 990, "2024-01-03", None, Some(1));
        let posted = item.to_posted(BILL_DATE_FORMAT).unwrap().unwrap();
        assert_eq!(posted.title, "");
        assert_eq!(posted.amount, 990);
    }

    #[test]
    fn test_line_item_with_bad_post_date_fails() {
        let item = RawLineItem::new("Rent", 5000, "2024/01/03", None, Some(1));
        assert!(matches!(
            item.to_posted(BILL_DATE_FORMAT),
            Err(ReconcileError::Parse(_))
        ));
    }
}
