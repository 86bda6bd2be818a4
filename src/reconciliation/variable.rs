//! Variable cost reconciliation from declared paid state and due date

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::config::ReconcileOptions;
use crate::types::*;

/// Evaluates variable plan items against the cycle close date
pub struct VariableCostReconciler<'a> {
    options: &'a ReconcileOptions,
}

impl<'a> VariableCostReconciler<'a> {
    /// Create a new variable cost reconciler
    pub fn new(options: &'a ReconcileOptions) -> Self {
        Self { options }
    }

    /// Produce one row per variable item, in plan order
    ///
    /// Fails on the first item whose due date cannot be parsed.
    pub fn reconcile(
        &self,
        variable_costs: &[VariableCostItem],
        close_date: NaiveDate,
    ) -> ReconcileResult<Vec<ReconciledCostRow>> {
        variable_costs
            .iter()
            .map(|item| self.reconcile_item(item, close_date))
            .collect()
    }

    /// Reconcile a single variable item
    pub fn reconcile_item(
        &self,
        item: &VariableCostItem,
        close_date: NaiveDate,
    ) -> ReconcileResult<ReconciledCostRow> {
        let due_date = item.due_date(&self.options.plan_date_format)?;

        let amount_pending = if item.already_paid {
            BigDecimal::from(0)
        } else {
            item.amount.clone()
        };
        let amount_paid = &item.amount - &amount_pending;

        Ok(ReconciledCostRow {
            cost_type: CostType::Variable,
            title: item.title.clone(),
            already_paid: item.already_paid,
            // A due date on the close date itself belongs to the next cycle.
            due_this_cycle: due_date < close_date,
            is_overpayment: amount_pending < BigDecimal::from(0),
            amount_paid,
            amount_pending,
            matched_transactions: 0,
        })
    }
}
