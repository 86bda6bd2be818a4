//! Fixed cost reconciliation against posted transactions

use bigdecimal::BigDecimal;

use crate::bill::TransactionSet;
use crate::config::ReconcileOptions;
use crate::types::*;

/// Matches fixed plan items against posted transactions by exact title
pub struct FixedCostReconciler<'a> {
    options: &'a ReconcileOptions,
}

impl<'a> FixedCostReconciler<'a> {
    /// Create a new fixed cost reconciler
    pub fn new(options: &'a ReconcileOptions) -> Self {
        Self { options }
    }

    /// Produce one row per fixed item, in plan order
    pub fn reconcile(
        &self,
        transactions: &TransactionSet,
        fixed_costs: &[FixedCostItem],
    ) -> Vec<ReconciledCostRow> {
        fixed_costs
            .iter()
            .map(|item| self.reconcile_item(transactions, item))
            .collect()
    }

    /// Reconcile a single fixed item
    pub fn reconcile_item(
        &self,
        transactions: &TransactionSet,
        item: &FixedCostItem,
    ) -> ReconciledCostRow {
        let mut matched = 0;
        let mut amount_paid = BigDecimal::from(0);
        for txn in transactions.matching(&item.title) {
            matched += 1;
            amount_paid += self.options.to_major(txn.amount);
        }

        if matched == 0 {
            tracing::debug!(title = %item.title, "fixed cost has no matching transaction");
        }

        let amount_pending = &item.amount - &amount_paid;
        let zero = BigDecimal::from(0);

        ReconciledCostRow {
            cost_type: CostType::Fixed,
            title: item.title.clone(),
            already_paid: amount_pending <= zero,
            is_overpayment: amount_pending < zero,
            // Fixed costs recur every cycle.
            due_this_cycle: true,
            amount_paid,
            amount_pending,
            matched_transactions: matched,
        }
    }
}
