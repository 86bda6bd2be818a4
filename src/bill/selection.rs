//! Open bill selection

use crate::bill::BillListing;
use crate::types::*;

/// Select the open bill from the issuer's listing
///
/// The first open bill in listing order wins when several are reported.
pub fn select_open_bill(bills: &[BillListing]) -> ReconcileResult<&BillListing> {
    let mut open = bills.iter().filter(|bill| bill.is_open());
    let selected = open.next().ok_or_else(|| {
        ReconcileError::NotFound(format!(
            "No open bill among {} listed bill(s)",
            bills.len()
        ))
    })?;

    let extra = open.count();
    if extra > 0 {
        tracing::warn!(
            bill_id = %selected.id,
            extra,
            "multiple open bills listed, using the first"
        );
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::BillState;

    #[test]
    fn test_empty_listing_is_not_found() {
        let err = select_open_bill(&[]).unwrap_err();
        assert!(matches!(err, ReconcileError::NotFound(_)));
    }

    #[test]
    fn test_no_open_bill_is_not_found() {
        let bills = vec![
            BillListing::new("b1", BillState::Closed),
            BillListing::new("b2", BillState::Future),
        ];
        assert!(matches!(
            select_open_bill(&bills),
            Err(ReconcileError::NotFound(_))
        ));
    }

    #[test]
    fn test_selects_open_bill() {
        let bills = vec![
            BillListing::new("b1", BillState::Overdue),
            BillListing::new("b2", BillState::Open),
            BillListing::new("b3", BillState::Future),
        ];
        assert_eq!(select_open_bill(&bills).unwrap().id, "b2");
    }

    #[test]
    fn test_first_open_bill_wins() {
        let bills = vec![
            BillListing::new("b1", BillState::Open),
            BillListing::new("b2", BillState::Open),
        ];
        assert_eq!(select_open_bill(&bills).unwrap().id, "b1");
    }
}
