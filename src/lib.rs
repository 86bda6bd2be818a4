//! # Cycle Reconcile
//!
//! Reconciles the open credit-card billing cycle against a personal budget
//! plan of fixed and variable costs.
//!
//! ## Features
//!
//! - **Fixed cost reconciliation**: exact-title matching of plan items against posted charges
//! - **Variable cost reconciliation**: declared paid state and due date against the cycle close date
//! - **Cycle totals**: overpayment credit, pending variable costs and unplanned spend
//! - **Categorization**: every posted charge classified as fixed, variable or other
//! - **Collaborator abstraction**: async traits for bill providers, caches and plan sources
//!
//! ## Quick Start
//!
//! ```rust
//! use cycle_reconcile::{reconcile_cycle, BudgetPlan, FixedCostItem, PostedTransaction, TransactionSet};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let plan = BudgetPlan::new(
//!     vec![FixedCostItem::new("Rent".to_string(), BigDecimal::from(1000)).unwrap()],
//!     vec![],
//!     None,
//! );
//! let charges = TransactionSet::new(vec![PostedTransaction::new(
//!     "Rent".to_string(),
//!     100000,
//!     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
//!     "housing".to_string(),
//!     1,
//! )]);
//!
//! let summary = reconcile_cycle(&charges, &plan, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();
//! assert!(summary.reconciled_costs[0].already_paid);
//! ```

pub mod bill;
pub mod config;
pub mod cycle;
pub mod plan;
pub mod reconciliation;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use bill::*;
pub use config::ReconcileOptions;
pub use cycle::*;
pub use reconciliation::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
pub use utils::init_tracing;
