//! Traits for the collaborators around the reconciliation core

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;

use crate::bill::{select_open_bill, BillDetail, BillListing};
use crate::config::{ReconcileOptions, BILL_DATE_FORMAT};
use crate::types::*;

/// Source of bill data, typically the card issuer's API
///
/// Failures surface as [`ReconcileError::Provider`] and are never retried here.
#[async_trait]
pub trait BillDataProvider: Send + Sync {
    /// List the account's bills with their states
    async fn fetch_bills(&self) -> ReconcileResult<Vec<BillListing>>;

    /// Fetch the full detail of one bill
    async fn fetch_bill_details(&self, bill: &BillListing) -> ReconcileResult<BillDetail>;

    /// Fetch the open bill's detail together with its close date
    async fn fetch_open_bill(&self) -> ReconcileResult<(BillDetail, NaiveDate)> {
        let bills = self.fetch_bills().await?;
        let open_bill = select_open_bill(&bills)?;
        let detail = self.fetch_bill_details(open_bill).await?;
        let close_date = detail.close_date(BILL_DATE_FORMAT)?;
        Ok((detail, close_date))
    }
}

/// Local cache of the last fetched open bill detail
#[async_trait]
pub trait BillCache: Send + Sync {
    /// Load the cached detail; `None` is a cache miss
    async fn load(&self) -> ReconcileResult<Option<BillDetail>>;

    /// Replace the cached detail
    async fn store(&self, detail: &BillDetail) -> ReconcileResult<()>;
}

/// Source of the budget plan
#[async_trait]
pub trait BudgetPlanProvider: Send + Sync {
    /// Load the plan for the current cycle
    async fn load_plan(&self) -> ReconcileResult<BudgetPlan>;
}

/// Receiver of finished cycle summaries
pub trait ReportConsumer: Send + Sync {
    fn consume(&self, summary: &CycleSummary) -> ReconcileResult<()>;
}

/// Trait for implementing budget plan validation rules
pub trait PlanValidator: Send + Sync {
    /// Validate a plan before it is reconciled with `options`
    fn validate_plan(&self, plan: &BudgetPlan, options: &ReconcileOptions)
        -> ReconcileResult<()>;
}

/// Default plan validator: titles must be non-empty and unique across the plan
pub struct DefaultPlanValidator;

impl PlanValidator for DefaultPlanValidator {
    fn validate_plan(
        &self,
        plan: &BudgetPlan,
        _options: &ReconcileOptions,
    ) -> ReconcileResult<()> {
        let mut seen = HashSet::new();
        for title in plan.titles() {
            if title.trim().is_empty() {
                return Err(ReconcileError::Config(
                    "Plan item title cannot be empty".to_string(),
                ));
            }
            if !seen.insert(title) {
                return Err(ReconcileError::Config(format!(
                    "Plan title '{}' is declared more than once",
                    title
                )));
            }
        }
        Ok(())
    }
}
