//! Run orchestration: fetch or load the bill, load the plan, reconcile, report

use chrono::NaiveDate;

use crate::bill::{BillDetail, TransactionSet};
use crate::config::{ReconcileOptions, BILL_DATE_FORMAT};
use crate::reconciliation::ReconciliationEngine;
use crate::traits::*;
use crate::types::*;

/// Where the open bill detail comes from for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillSource {
    /// Fetch from the provider and refresh the cache
    #[default]
    Online,
    /// Use the cached detail only
    Cached,
    /// Use the cache, fetching online on a miss
    CachedOrOnline,
}

/// Coordinates the collaborators around one reconciliation run
pub struct CycleReconciler<B: BillDataProvider, C: BillCache, P: BudgetPlanProvider> {
    bills: B,
    cache: C,
    plans: P,
    validator: Box<dyn PlanValidator>,
    engine: ReconciliationEngine,
}

impl<B: BillDataProvider, C: BillCache, P: BudgetPlanProvider> CycleReconciler<B, C, P> {
    /// Create a new reconciler with default options and plan validation
    pub fn new(bills: B, cache: C, plans: P) -> Self {
        Self {
            bills,
            cache,
            plans,
            validator: Box::new(DefaultPlanValidator),
            engine: ReconciliationEngine::new(),
        }
    }

    /// Replace the plan validator
    pub fn with_validator(mut self, validator: Box<dyn PlanValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the reconciliation options
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.engine = ReconciliationEngine::with_options(options);
        self
    }

    /// Obtain the open bill detail and its close date
    pub async fn load_open_bill(
        &self,
        source: BillSource,
    ) -> ReconcileResult<(BillDetail, NaiveDate)> {
        match source {
            BillSource::Online => self.fetch_and_cache().await,
            BillSource::Cached => {
                let detail = self.cache.load().await?.ok_or_else(|| {
                    ReconcileError::NotFound("No cached open bill detail".to_string())
                })?;
                let close_date = detail.close_date(BILL_DATE_FORMAT)?;
                Ok((detail, close_date))
            }
            BillSource::CachedOrOnline => match self.cache.load().await? {
                Some(detail) => {
                    let close_date = detail.close_date(BILL_DATE_FORMAT)?;
                    Ok((detail, close_date))
                }
                None => {
                    tracing::warn!("bill cache miss, fetching open bill from provider");
                    self.fetch_and_cache().await
                }
            },
        }
    }

    async fn fetch_and_cache(&self) -> ReconcileResult<(BillDetail, NaiveDate)> {
        let (detail, close_date) = self.bills.fetch_open_bill().await?;
        self.cache.store(&detail).await?;
        tracing::info!(close_date = %close_date, "fetched open bill");
        Ok((detail, close_date))
    }

    /// Load and validate the budget plan
    pub async fn load_plan(&self) -> ReconcileResult<BudgetPlan> {
        let plan = self.plans.load_plan().await?;
        self.validator.validate_plan(&plan, self.engine.options())?;
        Ok(plan)
    }

    /// Run a full reconciliation for the open cycle
    pub async fn run(&self, source: BillSource) -> ReconcileResult<CycleSummary> {
        let (detail, close_date) = self.load_open_bill(source).await?;
        let plan = self.load_plan().await?;
        let transactions = TransactionSet::from_detail(&detail)?;
        self.engine.reconcile(&transactions, &plan, close_date)
    }

    /// Run a reconciliation and hand the summary to a consumer
    pub async fn run_and_report(
        &self,
        source: BillSource,
        consumer: &dyn ReportConsumer,
    ) -> ReconcileResult<CycleSummary> {
        let summary = self.run(source).await?;
        consumer.consume(&summary)?;
        Ok(summary)
    }
}
