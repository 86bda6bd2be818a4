//! Core types and data structures for cycle reconciliation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::BILL_DATE_FORMAT;

/// Kind of planned cost a reconciled row was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    /// Recurring cost expected to be paid every cycle
    Fixed,
    /// Cost with an externally declared paid state and due date
    Variable,
}

/// Classification of a posted transaction against the budget plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendType {
    /// Title matches a fixed plan item
    Fixed,
    /// Title matches a variable plan item
    Variable,
    /// Title matches no plan item
    Other,
}

impl SpendType {
    /// Whether this spend was anticipated by the plan
    pub fn is_planned(&self) -> bool {
        !matches!(self, SpendType::Other)
    }
}

impl From<CostType> for SpendType {
    fn from(cost_type: CostType) -> Self {
        match cost_type {
            CostType::Fixed => SpendType::Fixed,
            CostType::Variable => SpendType::Variable,
        }
    }
}

/// A posted line item of the open bill that carries charge information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTransaction {
    /// Merchant or description line as shown on the bill
    pub title: String,
    /// Amount in minor currency units (cents)
    pub amount: i64,
    /// Date the charge was posted
    pub post_date: NaiveDate,
    /// Category assigned by the card issuer
    pub category: String,
    /// Number of installments (charges) reported for the line item
    pub charges: u32,
}

impl PostedTransaction {
    /// Create a new posted transaction
    ///
    /// Issuer titles are taken as listed; a blank title simply never matches
    /// a plan item.
    pub fn new(
        title: String,
        amount: i64,
        post_date: NaiveDate,
        category: String,
        charges: u32,
    ) -> Self {
        Self {
            title,
            amount,
            post_date,
            category,
            charges,
        }
    }
}

/// A fixed cost declared in the budget plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCostItem {
    /// Title used to match posted transactions, unique within the plan
    pub title: String,
    /// Planned amount in major currency units
    pub amount: BigDecimal,
}

impl FixedCostItem {
    /// Create a new fixed cost item
    pub fn new(title: String, amount: BigDecimal) -> ReconcileResult<Self> {
        if title.trim().is_empty() {
            return Err(ReconcileError::Config(
                "Fixed cost title cannot be empty".to_string(),
            ));
        }
        Ok(Self { title, amount })
    }
}

/// A variable cost declared in the budget plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCostItem {
    pub title: String,
    /// Planned amount in major currency units
    pub amount: BigDecimal,
    /// Paid state as declared by the plan owner
    pub already_paid: bool,
    /// Due date exactly as declared, parsed during reconciliation
    pub payment_date: String,
}

impl VariableCostItem {
    /// Create a new variable cost item
    pub fn new(
        title: String,
        amount: BigDecimal,
        already_paid: bool,
        payment_date: String,
    ) -> ReconcileResult<Self> {
        if title.trim().is_empty() {
            return Err(ReconcileError::Config(
                "Variable cost title cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            title,
            amount,
            already_paid,
            payment_date,
        })
    }

    /// Parse the declared due date with the given chrono format
    pub fn due_date(&self, format: &str) -> ReconcileResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.payment_date, format).map_err(|e| {
            ReconcileError::Parse(format!(
                "Invalid payment date '{}' for variable cost '{}': {}",
                self.payment_date, self.title, e
            ))
        })
    }
}

/// Budget plan for one billing cycle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Fixed costs in declaration order
    pub fixed: Vec<FixedCostItem>,
    /// Variable costs in declaration order
    pub variable: Vec<VariableCostItem>,
    /// Optional cap on total spend for the cycle, in major units
    pub spending_limit: Option<BigDecimal>,
}

impl BudgetPlan {
    /// Create a new plan
    pub fn new(
        fixed: Vec<FixedCostItem>,
        variable: Vec<VariableCostItem>,
        spending_limit: Option<BigDecimal>,
    ) -> Self {
        Self {
            fixed,
            variable,
            spending_limit,
        }
    }

    /// Iterate over every declared title, fixed first
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.fixed
            .iter()
            .map(|item| item.title.as_str())
            .chain(self.variable.iter().map(|item| item.title.as_str()))
    }

    /// Whether the title belongs to a fixed cost
    pub fn is_fixed_title(&self, title: &str) -> bool {
        self.fixed.iter().any(|item| item.title == title)
    }
}

/// Reconciliation outcome for one planned cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledCostRow {
    #[serde(rename = "type")]
    pub cost_type: CostType,
    pub title: String,
    /// Amount paid so far, in major units
    pub amount_paid: BigDecimal,
    /// Planned amount minus paid amount; negative on overpayment
    pub amount_pending: BigDecimal,
    pub already_paid: bool,
    /// Whether the cost is expected to settle within this cycle
    pub due_this_cycle: bool,
    pub is_overpayment: bool,
    /// Posted transactions matched to this row (always 0 for variable costs)
    pub matched_transactions: usize,
}

impl ReconciledCostRow {
    /// Planned amount the row was reconciled against
    pub fn planned_amount(&self) -> BigDecimal {
        &self.amount_paid + &self.amount_pending
    }
}

/// A posted transaction with its plan classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub title: String,
    pub post_date: NaiveDate,
    pub category: String,
    /// Amount in major currency units
    pub amount: BigDecimal,
    #[serde(rename = "type")]
    pub spend_type: SpendType,
}

/// Result of reconciling one billing cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    /// Close date of the open bill
    pub close_date: NaiveDate,
    /// Fixed rows in plan order followed by variable rows in plan order
    pub reconciled_costs: Vec<ReconciledCostRow>,
    /// One entry per posted transaction, in bill order
    pub categorized_transactions: Vec<CategorizedTransaction>,
    /// Sum of overpayments, reported as a positive figure
    pub total_overpayment: BigDecimal,
    /// Unpaid variable costs due within this cycle
    pub pending_variable_total: BigDecimal,
    /// Spend on transactions matching no fixed cost, in major units
    pub unplanned_spend_total: BigDecimal,
}

impl CycleSummary {
    /// Close date formatted the way the bill reports it
    pub fn close_date_label(&self) -> String {
        self.close_date.format(BILL_DATE_FORMAT).to_string()
    }

    /// Reconciled rows of one cost type
    pub fn costs_of_type(&self, cost_type: CostType) -> impl Iterator<Item = &ReconciledCostRow> {
        self.reconciled_costs
            .iter()
            .filter(move |row| row.cost_type == cost_type)
    }

    /// Fixed costs for which no posted transaction carried the same title
    pub fn unmatched_fixed_costs(&self) -> Vec<&ReconciledCostRow> {
        self.costs_of_type(CostType::Fixed)
            .filter(|row| row.matched_transactions == 0)
            .collect()
    }

    /// Categorized transactions of one spend type
    pub fn transactions_of_type(
        &self,
        spend_type: SpendType,
    ) -> impl Iterator<Item = &CategorizedTransaction> {
        self.categorized_transactions
            .iter()
            .filter(move |txn| txn.spend_type == spend_type)
    }
}

/// Errors that can occur while reconciling a cycle
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Report error: {0}")]
    Report(String),
}

impl From<std::io::Error> for ReconcileError {
    fn from(err: std::io::Error) -> Self {
        ReconcileError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ReconcileError {
    fn from(err: serde_json::Error) -> Self {
        ReconcileError::Storage(err.to_string())
    }
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
