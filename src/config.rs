//! Run options and default on-disk locations

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Date format used by variable cost due dates in the budget plan
pub const PLAN_DATE_FORMAT: &str = "%Y/%m/%d";

/// Date format used by the bill provider (close date and post dates)
pub const BILL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Directory name used under the platform cache/config roots
pub const APP_DIR_NAME: &str = "cycle-reconcile";

const CACHE_FILE_NAME: &str = "open_bill_details.json";
const PLAN_FILE_NAME: &str = "budget_plan.json";

/// Options controlling how a cycle is reconciled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Decimal exponent between minor and major units (2 for cents)
    pub minor_unit_exponent: i64,
    /// chrono format of variable cost due dates
    pub plan_date_format: String,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            minor_unit_exponent: 2,
            plan_date_format: PLAN_DATE_FORMAT.to_string(),
        }
    }
}

impl ReconcileOptions {
    /// Options for data where transactions and plan share one unit
    pub fn same_units() -> Self {
        Self {
            minor_unit_exponent: 0,
            ..Self::default()
        }
    }

    /// Convert a minor-unit amount to major units
    pub fn to_major(&self, minor: i64) -> BigDecimal {
        BigDecimal::new(minor.into(), self.minor_unit_exponent)
    }
}

/// Default location of the cached open bill detail
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR_NAME).join(CACHE_FILE_NAME))
}

/// Default location of the budget plan document
pub fn default_plan_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PLAN_FILE_NAME))
}
