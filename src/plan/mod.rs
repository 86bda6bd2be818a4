//! Budget plan document parsing
//!
//! The plan lives in a JSON document under a `costs` key:
//!
//! ```json
//! {
//!   "costs": {
//!     "fixed": [{"title": "Rent", "amount": 1000}],
//!     "variable": [{"title": "Gym", "amount": 80, "already_paid": 0, "payment_date": "2024/01/10"}],
//!     "spending_limit": 3500
//!   }
//! }
//! ```

use bigdecimal::BigDecimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::str::FromStr;

use crate::types::*;

/// Whole plan document; other top-level keys are ignored
#[derive(Debug, Deserialize)]
struct PlanDocument {
    costs: RawCosts,
}

#[derive(Debug, Deserialize)]
struct RawCosts {
    fixed: Vec<RawFixedCost>,
    variable: Vec<RawVariableCost>,
    #[serde(default, deserialize_with = "optional_amount")]
    spending_limit: Option<BigDecimal>,
}

#[derive(Debug, Deserialize)]
struct RawFixedCost {
    title: String,
    #[serde(deserialize_with = "amount")]
    amount: BigDecimal,
}

#[derive(Debug, Deserialize)]
struct RawVariableCost {
    title: String,
    #[serde(deserialize_with = "amount")]
    amount: BigDecimal,
    #[serde(deserialize_with = "paid_flag")]
    already_paid: bool,
    payment_date: String,
}

/// Amounts may be written as JSON numbers or as decimal strings
#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(Number),
    Text(String),
}

/// `already_paid` may be a boolean or a 0/1 style number
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(Number),
}

// Numbers go through their decimal text so 0.1 stays 0.1.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    let text = match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(number) => number.to_string(),
        AmountRepr::Text(text) => text.trim().to_string(),
    };
    BigDecimal::from_str(&text)
        .map_err(|e| D::Error::custom(format!("invalid amount '{}': {}", text, e)))
}

fn optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BigDecimal>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "amount")] BigDecimal);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(value)| value))
}

fn paid_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(flag) => Ok(flag),
        FlagRepr::Number(number) => number
            .as_f64()
            .map(|n| n != 0.0)
            .ok_or_else(|| D::Error::custom(format!("invalid paid flag '{}'", number))),
    }
}

fn invalid_plan(e: serde_json::Error) -> ReconcileError {
    ReconcileError::Config(format!("Invalid budget plan: {}", e))
}

/// Parse a plan document from JSON text
pub fn parse_plan_document(text: &str) -> ReconcileResult<BudgetPlan> {
    let document: PlanDocument = serde_json::from_str(text).map_err(invalid_plan)?;
    document.costs.into_plan()
}

/// Extract the plan from a parsed document holding a `costs` object
pub fn plan_from_document(document: &Value) -> ReconcileResult<BudgetPlan> {
    PlanDocument::deserialize(document)
        .map_err(invalid_plan)?
        .costs
        .into_plan()
}

/// Build a plan from the `costs` object itself
pub fn plan_from_costs(costs: &Value) -> ReconcileResult<BudgetPlan> {
    RawCosts::deserialize(costs)
        .map_err(invalid_plan)?
        .into_plan()
}

impl RawCosts {
    fn into_plan(self) -> ReconcileResult<BudgetPlan> {
        let fixed = self
            .fixed
            .into_iter()
            .map(|item| FixedCostItem::new(item.title, item.amount))
            .collect::<ReconcileResult<Vec<_>>>()?;

        let variable = self
            .variable
            .into_iter()
            .map(|item| {
                VariableCostItem::new(
                    item.title,
                    item.amount,
                    item.already_paid,
                    item.payment_date,
                )
            })
            .collect::<ReconcileResult<Vec<_>>>()?;

        Ok(BudgetPlan::new(fixed, variable, self.spending_limit))
    }
}
