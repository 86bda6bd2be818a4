//! Spending breakdown by plan classification and post date

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::*;

/// Total spend of one classification and its share of all spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendTypeTotal {
    #[serde(rename = "type")]
    pub spend_type: SpendType,
    pub amount: BigDecimal,
    /// Share of total spend in percent, rounded to one decimal
    pub percentage: BigDecimal,
}

/// Running totals at the end of one post date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSpendPoint {
    pub post_date: NaiveDate,
    pub total: BigDecimal,
    pub planned: BigDecimal,
    pub other: BigDecimal,
}

/// Breakdown of the cycle's posted spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingBreakdown {
    /// Totals for each classification present, in fixed, variable, other order
    pub by_type: Vec<SpendTypeTotal>,
    /// Running totals per post date, oldest first
    pub cumulative: Vec<CumulativeSpendPoint>,
    pub total_spend: BigDecimal,
    /// Spending limit minus total spend, when the plan declares a limit
    pub remaining_limit: Option<BigDecimal>,
}

impl SpendingBreakdown {
    /// Build the breakdown from a reconciled cycle
    pub fn from_summary(summary: &CycleSummary, spending_limit: Option<&BigDecimal>) -> Self {
        let total_spend: BigDecimal = summary
            .categorized_transactions
            .iter()
            .map(|txn| &txn.amount)
            .sum();

        let by_type = [SpendType::Fixed, SpendType::Variable, SpendType::Other]
            .into_iter()
            .filter_map(|spend_type| {
                let mut rows = summary.transactions_of_type(spend_type).peekable();
                rows.peek()?;
                let amount: BigDecimal = rows.map(|txn| &txn.amount).sum();
                let percentage = percentage_of(&amount, &total_spend);
                Some(SpendTypeTotal {
                    spend_type,
                    amount,
                    percentage,
                })
            })
            .collect();

        Self {
            by_type,
            cumulative: cumulative_by_post_date(&summary.categorized_transactions),
            remaining_limit: spending_limit.map(|limit| limit - &total_spend),
            total_spend,
        }
    }

    /// Total for one classification, zero when absent
    pub fn total_for(&self, spend_type: SpendType) -> BigDecimal {
        self.by_type
            .iter()
            .find(|total| total.spend_type == spend_type)
            .map(|total| total.amount.clone())
            .unwrap_or_else(|| BigDecimal::from(0))
    }
}

/// Running total, planned and other spend at the end of each post date
pub fn cumulative_by_post_date(
    transactions: &[CategorizedTransaction],
) -> Vec<CumulativeSpendPoint> {
    let mut per_day: BTreeMap<NaiveDate, (BigDecimal, BigDecimal)> = BTreeMap::new();
    for txn in transactions {
        let (planned, other) = per_day
            .entry(txn.post_date)
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
        if txn.spend_type.is_planned() {
            *planned += &txn.amount;
        } else {
            *other += &txn.amount;
        }
    }

    let mut planned_total = BigDecimal::from(0);
    let mut other_total = BigDecimal::from(0);
    per_day
        .into_iter()
        .map(|(post_date, (planned, other))| {
            planned_total += planned;
            other_total += other;
            CumulativeSpendPoint {
                post_date,
                total: &planned_total + &other_total,
                planned: planned_total.clone(),
                other: other_total.clone(),
            }
        })
        .collect()
}

fn percentage_of(amount: &BigDecimal, total: &BigDecimal) -> BigDecimal {
    if *total == BigDecimal::from(0) {
        return BigDecimal::from(0);
    }
    (amount.clone() * BigDecimal::from(100) / total.clone()).round(1)
}
