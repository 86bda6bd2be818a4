//! Reconciliation engine for a billing cycle against a budget plan
//!
//! Fixed costs are matched against posted transactions by exact title.
//! Variable costs are evaluated from their declared paid state and due date.
//! Both ledgers are then merged into a [`CycleSummary`].

pub mod aggregator;
pub mod fixed;
pub mod variable;

pub use aggregator::*;
pub use fixed::*;
pub use variable::*;

use chrono::NaiveDate;

use crate::bill::TransactionSet;
use crate::config::ReconcileOptions;
use crate::types::*;

/// Runs fixed, variable and aggregate reconciliation over one cycle
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    options: ReconcileOptions,
}

impl ReconciliationEngine {
    /// Create an engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options
    pub fn with_options(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconcile the cycle and build its summary
    ///
    /// Any failure aborts the whole run; no partial summary is returned.
    pub fn reconcile(
        &self,
        transactions: &TransactionSet,
        plan: &BudgetPlan,
        close_date: NaiveDate,
    ) -> ReconcileResult<CycleSummary> {
        let fixed_rows = FixedCostReconciler::new(&self.options).reconcile(transactions, &plan.fixed);
        let variable_rows =
            VariableCostReconciler::new(&self.options).reconcile(&plan.variable, close_date)?;

        let summary = ReconciliationAggregator::new(&self.options).aggregate(
            close_date,
            fixed_rows,
            variable_rows,
            transactions,
        );

        tracing::info!(
            close_date = %summary.close_date_label(),
            costs = summary.reconciled_costs.len(),
            transactions = summary.categorized_transactions.len(),
            unmatched_fixed = summary.unmatched_fixed_costs().len(),
            "reconciled billing cycle"
        );

        Ok(summary)
    }
}

/// Reconcile one cycle with default options
pub fn reconcile_cycle(
    transactions: &TransactionSet,
    plan: &BudgetPlan,
    close_date: NaiveDate,
) -> ReconcileResult<CycleSummary> {
    ReconciliationEngine::new().reconcile(transactions, plan, close_date)
}
