//! In-memory collaborator implementations for testing and embedding

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::bill::{BillDetail, BillListing};
use crate::traits::*;
use crate::types::*;

fn poisoned<E>(_: E) -> ReconcileError {
    ReconcileError::Storage("in-memory lock poisoned".to_string())
}

/// Bill provider serving a fixed listing and bill details keyed by bill ID
#[derive(Debug, Clone, Default)]
pub struct MemoryBillProvider {
    bills: Vec<BillListing>,
    details: HashMap<String, BillDetail>,
}

impl MemoryBillProvider {
    /// Create a new provider with no bills
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bill and its detail
    pub fn with_bill(mut self, listing: BillListing, detail: BillDetail) -> Self {
        self.details.insert(listing.id.clone(), detail);
        self.bills.push(listing);
        self
    }

    /// Add a bill listing without any detail behind it
    pub fn with_listing(mut self, listing: BillListing) -> Self {
        self.bills.push(listing);
        self
    }
}

#[async_trait]
impl BillDataProvider for MemoryBillProvider {
    async fn fetch_bills(&self) -> ReconcileResult<Vec<BillListing>> {
        Ok(self.bills.clone())
    }

    async fn fetch_bill_details(&self, bill: &BillListing) -> ReconcileResult<BillDetail> {
        self.details.get(&bill.id).cloned().ok_or_else(|| {
            ReconcileError::Provider(format!("No detail available for bill '{}'", bill.id))
        })
    }
}

/// Bill cache held in memory, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryBillCache {
    detail: Arc<RwLock<Option<BillDetail>>>,
}

impl MemoryBillCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache already holding a detail
    pub fn with_detail(detail: BillDetail) -> Self {
        Self {
            detail: Arc::new(RwLock::new(Some(detail))),
        }
    }

    /// Drop the cached detail
    pub fn clear(&self) -> ReconcileResult<()> {
        *self.detail.write().map_err(poisoned)? = None;
        Ok(())
    }
}

#[async_trait]
impl BillCache for MemoryBillCache {
    async fn load(&self) -> ReconcileResult<Option<BillDetail>> {
        Ok(self.detail.read().map_err(poisoned)?.clone())
    }

    async fn store(&self, detail: &BillDetail) -> ReconcileResult<()> {
        *self.detail.write().map_err(poisoned)? = Some(detail.clone());
        Ok(())
    }
}

/// Plan provider returning a fixed plan
#[derive(Debug, Clone, Default)]
pub struct MemoryPlanProvider {
    plan: BudgetPlan,
}

impl MemoryPlanProvider {
    pub fn new(plan: BudgetPlan) -> Self {
        Self { plan }
    }
}

#[async_trait]
impl BudgetPlanProvider for MemoryPlanProvider {
    async fn load_plan(&self) -> ReconcileResult<BudgetPlan> {
        Ok(self.plan.clone())
    }
}

/// Report consumer that keeps every summary it receives
#[derive(Debug, Clone, Default)]
pub struct CollectingReportConsumer {
    summaries: Arc<RwLock<Vec<CycleSummary>>>,
}

impl CollectingReportConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summaries received so far, oldest first
    pub fn summaries(&self) -> ReconcileResult<Vec<CycleSummary>> {
        Ok(self.summaries.read().map_err(poisoned)?.clone())
    }
}

impl ReportConsumer for CollectingReportConsumer {
    fn consume(&self, summary: &CycleSummary) -> ReconcileResult<()> {
        self.summaries
            .write()
            .map_err(poisoned)?
            .push(summary.clone());
        Ok(())
    }
}
