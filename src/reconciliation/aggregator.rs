//! Merges reconciled ledgers into cycle totals and categorizes transactions

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::bill::TransactionSet;
use crate::config::ReconcileOptions;
use crate::types::*;

/// Builds the [`CycleSummary`] from fixed and variable rows
pub struct ReconciliationAggregator<'a> {
    options: &'a ReconcileOptions,
}

impl<'a> ReconciliationAggregator<'a> {
    /// Create a new aggregator
    pub fn new(options: &'a ReconcileOptions) -> Self {
        Self { options }
    }

    /// Merge both ledgers, fixed rows first, and derive the cycle figures
    pub fn aggregate(
        &self,
        close_date: NaiveDate,
        fixed_rows: Vec<ReconciledCostRow>,
        variable_rows: Vec<ReconciledCostRow>,
        transactions: &TransactionSet,
    ) -> CycleSummary {
        let mut reconciled_costs = fixed_rows;
        reconciled_costs.extend(variable_rows);

        let total_overpayment = total_overpayment(&reconciled_costs);
        let pending_variable_total = pending_variable_total(&reconciled_costs);
        let unplanned_spend_total = self.unplanned_spend_total(&reconciled_costs, transactions);
        let categorized_transactions = self.categorize(&reconciled_costs, transactions);

        CycleSummary {
            close_date,
            reconciled_costs,
            categorized_transactions,
            total_overpayment,
            pending_variable_total,
            unplanned_spend_total,
        }
    }

    /// Spend on transactions whose title matches no fixed cost, in major units
    ///
    /// Transactions matching a variable cost still count here.
    pub fn unplanned_spend_total(
        &self,
        ledger: &[ReconciledCostRow],
        transactions: &TransactionSet,
    ) -> BigDecimal {
        let fixed_titles: HashSet<&str> = ledger
            .iter()
            .filter(|row| row.cost_type == CostType::Fixed)
            .map(|row| row.title.as_str())
            .collect();

        transactions
            .iter()
            .filter(|txn| !fixed_titles.contains(txn.title.as_str()))
            .map(|txn| self.options.to_major(txn.amount))
            .sum()
    }

    /// Classify every transaction by the ledger row carrying its title
    pub fn categorize(
        &self,
        ledger: &[ReconciledCostRow],
        transactions: &TransactionSet,
    ) -> Vec<CategorizedTransaction> {
        let mut types: HashMap<&str, SpendType> = HashMap::with_capacity(ledger.len());
        for row in ledger {
            // First row in ledger order wins, so fixed shadows variable.
            types
                .entry(row.title.as_str())
                .or_insert_with(|| row.cost_type.into());
        }

        transactions
            .iter()
            .map(|txn| CategorizedTransaction {
                title: txn.title.clone(),
                post_date: txn.post_date,
                category: txn.category.clone(),
                amount: self.options.to_major(txn.amount),
                spend_type: types
                    .get(txn.title.as_str())
                    .copied()
                    .unwrap_or(SpendType::Other),
            })
            .collect()
    }
}

/// Overpayments across the ledger as a positive figure
pub fn total_overpayment(ledger: &[ReconciledCostRow]) -> BigDecimal {
    let pending: BigDecimal = ledger
        .iter()
        .filter(|row| row.is_overpayment)
        .map(|row| &row.amount_pending)
        .sum();
    -pending
}

/// Pending amount of variable costs due within the cycle
pub fn pending_variable_total(ledger: &[ReconciledCostRow]) -> BigDecimal {
    ledger
        .iter()
        .filter(|row| row.cost_type == CostType::Variable && row.due_this_cycle)
        .map(|row| &row.amount_pending)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row(cost_type: CostType, title: &str, pending: i64, due: bool) -> ReconciledCostRow {
        let zero = BigDecimal::from(0);
        let pending = BigDecimal::from(pending);
        ReconciledCostRow {
            cost_type,
            title: title.to_string(),
            amount_paid: zero.clone(),
            already_paid: pending <= zero,
            is_overpayment: pending < zero,
            amount_pending: pending,
            due_this_cycle: due,
            matched_transactions: 0,
        }
    }

    fn txn(title: &str, amount: i64) -> PostedTransaction {
        PostedTransaction::new(
            title.to_string(),
            amount,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            "misc".to_string(),
            1,
        )
    }

    #[test]
    fn test_total_overpayment_is_positive() {
        let ledger = vec![
            row(CostType::Fixed, "Rent", -200, true),
            row(CostType::Fixed, "Power", -50, true),
            row(CostType::Fixed, "Water", 30, true),
        ];
        assert_eq!(total_overpayment(&ledger), BigDecimal::from(250));
        assert_eq!(total_overpayment(&[]), BigDecimal::from(0));
    }

    #[test]
    fn test_pending_variable_only_counts_due_rows() {
        let ledger = vec![
            row(CostType::Variable, "Gym", 80, true),
            row(CostType::Variable, "Doctor", 300, false),
            row(CostType::Fixed, "Rent", 1000, true),
        ];
        assert_eq!(pending_variable_total(&ledger), BigDecimal::from(80));
    }

    #[test]
    fn test_unplanned_excludes_only_fixed_titles() {
        let options = ReconcileOptions::default();
        let ledger = vec![
            row(CostType::Fixed, "Rent", 0, true),
            row(CostType::Variable, "Gym", 0, true),
        ];
        let set = TransactionSet::new(vec![
            txn("Rent", 100000),
            txn("Gym", 8000),
            txn("Coffee", 550),
        ]);

        let total = ReconciliationAggregator::new(&options).unplanned_spend_total(&ledger, &set);
        assert_eq!(total, BigDecimal::from_str("85.5").unwrap());
    }

    #[test]
    fn test_categorize_each_transaction_once() {
        let options = ReconcileOptions::default();
        let ledger = vec![
            row(CostType::Fixed, "Rent", 0, true),
            row(CostType::Variable, "Gym", 0, true),
        ];
        let set = TransactionSet::new(vec![
            txn("Coffee", 550),
            txn("Rent", 100000),
            txn("Gym", 8000),
            txn("Rent", 10),
        ]);

        let categorized = ReconciliationAggregator::new(&options).categorize(&ledger, &set);
        let types: Vec<SpendType> = categorized.iter().map(|c| c.spend_type).collect();
        assert_eq!(
            types,
            vec![
                SpendType::Other,
                SpendType::Fixed,
                SpendType::Variable,
                SpendType::Fixed
            ]
        );
        assert_eq!(categorized[0].amount, BigDecimal::from_str("5.5").unwrap());
    }

    #[test]
    fn test_blank_title_is_other_and_unplanned() {
        let options = ReconcileOptions::default();
        let ledger = vec![row(CostType::Fixed, "Rent", 0, true)];
        let set = TransactionSet::new(vec![txn("Rent", 100000), txn("", 990)]);
        let aggregator = ReconciliationAggregator::new(&options);

        let categorized = aggregator.categorize(&ledger, &set);
        assert_eq!(categorized.len(), 2);
        assert_eq!(categorized[1].title, "");
        assert_eq!(categorized[1].spend_type, SpendType::Other);
        assert_eq!(
            aggregator.unplanned_spend_total(&ledger, &set),
            BigDecimal::from_str("9.9").unwrap()
        );
    }

    #[test]
    fn test_unplanned_total_of_extreme_amounts() {
        let options = ReconcileOptions::same_units();
        let set = TransactionSet::new(vec![txn("Wire", i64::MAX), txn("Wire", i64::MAX)]);

        let total = ReconciliationAggregator::new(&options).unplanned_spend_total(&[], &set);
        assert_eq!(total, BigDecimal::from(i64::MAX) * BigDecimal::from(2));
    }

    #[test]
    fn test_duplicate_title_resolves_to_fixed() {
        let options = ReconcileOptions::default();
        let ledger = vec![
            row(CostType::Fixed, "Insurance", 0, true),
            row(CostType::Variable, "Insurance", 0, true),
        ];
        let set = TransactionSet::new(vec![txn("Insurance", 1000)]);

        let categorized = ReconciliationAggregator::new(&options).categorize(&ledger, &set);
        assert_eq!(categorized.len(), 1);
        assert_eq!(categorized[0].spend_type, SpendType::Fixed);
    }
}
