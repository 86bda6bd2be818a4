//! Validation utilities

use bigdecimal::BigDecimal;

use crate::config::ReconcileOptions;
use crate::traits::*;
use crate::types::*;

/// Validate that a planned amount is not negative
pub fn validate_planned_amount(title: &str, amount: &BigDecimal) -> ReconcileResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(ReconcileError::Config(format!(
            "Planned amount for '{}' cannot be negative",
            title
        )))
    } else {
        Ok(())
    }
}

/// Validate that a plan title is usable as a match key
pub fn validate_plan_title(title: &str) -> ReconcileResult<()> {
    if title.trim().is_empty() {
        return Err(ReconcileError::Config(
            "Plan item title cannot be empty".to_string(),
        ));
    }

    // Surrounding whitespace silently breaks exact title matching.
    if title.trim() != title {
        return Err(ReconcileError::Config(format!(
            "Plan item title '{}' has leading or trailing whitespace",
            title
        )));
    }

    Ok(())
}

/// Stricter plan validator that also checks amounts and due dates up front
///
/// Due dates are parsed with the run's `plan_date_format`.
pub struct StrictPlanValidator;

impl PlanValidator for StrictPlanValidator {
    fn validate_plan(
        &self,
        plan: &BudgetPlan,
        options: &ReconcileOptions,
    ) -> ReconcileResult<()> {
        DefaultPlanValidator.validate_plan(plan, options)?;

        for item in &plan.fixed {
            validate_plan_title(&item.title)?;
            validate_planned_amount(&item.title, &item.amount)?;
        }

        for item in &plan.variable {
            validate_plan_title(&item.title)?;
            validate_planned_amount(&item.title, &item.amount)?;
            item.due_date(&options.plan_date_format)?;
        }

        if let Some(limit) = &plan.spending_limit {
            validate_planned_amount("spending_limit", limit)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_padding_is_rejected() {
        assert!(validate_plan_title("Rent").is_ok());
        assert!(validate_plan_title(" Rent").is_err());
        assert!(validate_plan_title("   ").is_err());
    }

    #[test]
    fn test_strict_validator_checks_due_dates() {
        let plan = BudgetPlan::new(
            vec![],
            vec![VariableCostItem::new(
                "Gym".to_string(),
                BigDecimal::from(80),
                false,
                "2024-01-10".to_string(),
            )
            .unwrap()],
            None,
        );
        assert!(matches!(
            StrictPlanValidator.validate_plan(&plan, &ReconcileOptions::default()),
            Err(ReconcileError::Parse(_))
        ));
    }

    #[test]
    fn test_strict_validator_uses_configured_date_format() {
        let plan = BudgetPlan::new(
            vec![],
            vec![VariableCostItem::new(
                "Gym".to_string(),
                BigDecimal::from(80),
                false,
                "10.01.2024".to_string(),
            )
            .unwrap()],
            None,
        );
        let options = ReconcileOptions {
            plan_date_format: "%d.%m.%Y".to_string(),
            ..ReconcileOptions::default()
        };

        assert!(StrictPlanValidator.validate_plan(&plan, &options).is_ok());
        assert!(matches!(
            StrictPlanValidator.validate_plan(&plan, &ReconcileOptions::default()),
            Err(ReconcileError::Parse(_))
        ));
    }

    #[test]
    fn test_strict_validator_rejects_negative_amounts() {
        let plan = BudgetPlan::new(
            vec![FixedCostItem::new("Rent".to_string(), BigDecimal::from(-1)).unwrap()],
            vec![],
            None,
        );
        assert!(matches!(
            StrictPlanValidator.validate_plan(&plan, &ReconcileOptions::default()),
            Err(ReconcileError::Config(_))
        ));
    }
}
