//! Target-based variable pay.
//!
//! Variable pay is only paid when the employee has both a variable pay
//! amount and a sales target, and an achievement figure is supplied for the
//! period. The payout scales with `achieved / target`, capped at 100% unless
//! the policy allows over-achievement.

use rust_decimal::Decimal;

use crate::config::VariablePayRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee};

use super::{checked_amount, round_money};

/// The result of the variable pay calculation.
#[derive(Debug, Clone)]
pub struct VariablePayResult {
    /// Variable payable, rounded to two decimal places.
    pub variable_payable: Decimal,
    /// Uncapped achievement ratio, if one could be computed.
    pub achievement_ratio: Option<Decimal>,
    /// Highest bonus tier reached, if any.
    pub tier: Option<String>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates variable pay for a period.
///
/// # Errors
///
/// Returns `CalculationError` if the achievement ratio or the payout does
/// not fit in a `Decimal`, e.g. a huge achievement against a tiny target.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_variable_pay;
/// use payroll_engine::config::VariablePayRules;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new("emp_001", Decimal::new(40_000, 0));
/// employee.variable_pay = Some(Decimal::new(10_000, 0));
/// employee.sales_target = Some(Decimal::new(100_000, 0));
///
/// let result = calculate_variable_pay(
///     &employee,
///     Some(Decimal::new(75_000, 0)),
///     &VariablePayRules::default(),
///     2,
/// )
/// .unwrap();
/// assert_eq!(result.variable_payable, Decimal::new(7_500, 0));
/// ```
pub fn calculate_variable_pay(
    employee: &Employee,
    sales_achieved: Option<Decimal>,
    rules: &VariablePayRules,
    step_number: u32,
) -> EngineResult<VariablePayResult> {
    let input = serde_json::json!({
        "variable_pay": employee.variable_pay.map(|v| v.to_string()),
        "sales_target": employee.sales_target.map(|t| t.to_string()),
        "sales_achieved": sales_achieved.map(|a| a.to_string()),
        "payout_percentage": rules.payout_percentage.to_string(),
        "allow_over_achievement": rules.allow_over_achievement
    });

    let (variable_pay, target, achieved) = match (
        employee.variable_pay.filter(|v| !v.is_zero()),
        employee.sales_target.filter(|t| !t.is_zero()),
        sales_achieved,
    ) {
        (Some(v), Some(t), Some(a)) => (v, t, a),
        (None, _, _) => {
            return Ok(no_variable_pay(input, "Employee has no variable pay", step_number));
        }
        (_, None, _) => {
            return Ok(no_variable_pay(input, "Employee has no sales target", step_number));
        }
        (_, _, None) => {
            return Ok(no_variable_pay(
                input,
                "No sales achievement supplied for the period",
                step_number,
            ));
        }
    };

    let ratio = checked_amount(achieved.checked_div(target), "achievement ratio")?
        .max(Decimal::ZERO);
    let cap = if rules.allow_over_achievement {
        rules.max_achievement_ratio
    } else {
        Some(Decimal::ONE)
    };
    let capped_ratio = cap.map_or(ratio, |c| ratio.min(c));

    let variable_payable = round_money(checked_amount(
        variable_pay
            .checked_mul(capped_ratio)
            .and_then(|v| v.checked_mul(rules.payout_percentage))
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED)),
        "variable pay",
    )?);

    let achievement_percent = checked_amount(
        ratio.checked_mul(Decimal::ONE_HUNDRED),
        "achievement percentage",
    )?;
    let tier = rules
        .tiers
        .iter()
        .filter(|t| achievement_percent >= t.min_achievement_percent)
        .max_by(|a, b| a.min_achievement_percent.cmp(&b.min_achievement_percent))
        .map(|t| t.label.clone());

    let audit_step = AuditStep {
        step_number,
        rule_id: "variable_pay".to_string(),
        rule_name: "Target-Based Variable Pay".to_string(),
        input,
        output: serde_json::json!({
            "achievement_percent": round_money(achievement_percent).to_string(),
            "applied_ratio": capped_ratio.to_string(),
            "tier": tier,
            "variable_payable": variable_payable.to_string()
        }),
        reasoning: format!(
            "Achieved {} of {} target ({}%), paying {} x {} x {}% = {}",
            achieved,
            target,
            round_money(achievement_percent),
            variable_pay,
            capped_ratio,
            rules.payout_percentage,
            variable_payable
        ),
    };

    Ok(VariablePayResult {
        variable_payable,
        achievement_ratio: Some(ratio),
        tier,
        audit_step,
    })
}

fn no_variable_pay(input: serde_json::Value, reason: &str, step_number: u32) -> VariablePayResult {
    VariablePayResult {
        variable_payable: Decimal::ZERO,
        achievement_ratio: None,
        tier: None,
        audit_step: AuditStep {
            step_number,
            rule_id: "variable_pay".to_string(),
            rule_name: "Target-Based Variable Pay".to_string(),
            input,
            output: serde_json::json!({ "variable_payable": "0" }),
            reasoning: reason.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::config::BonusTier;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sales_employee() -> Employee {
        let mut employee = Employee::new("emp_sales", dec("40000"));
        employee.variable_pay = Some(dec("10000"));
        employee.sales_target = Some(dec("200000"));
        employee
    }

    fn tiered_rules() -> VariablePayRules {
        VariablePayRules {
            tiers: vec![
                BonusTier {
                    label: "gold".to_string(),
                    min_achievement_percent: dec("100"),
                },
                BonusTier {
                    label: "bronze".to_string(),
                    min_achievement_percent: dec("50"),
                },
                BonusTier {
                    label: "silver".to_string(),
                    min_achievement_percent: dec("80"),
                },
            ],
            ..VariablePayRules::default()
        }
    }

    #[test]
    fn test_partial_achievement_scales_pay() {
        let result = calculate_variable_pay(
            &sales_employee(),
            Some(dec("150000")),
            &VariablePayRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.variable_payable, dec("7500"));
        assert_eq!(result.achievement_ratio, Some(dec("0.75")));
    }

    #[test]
    fn test_over_achievement_capped_by_default() {
        let result = calculate_variable_pay(
            &sales_employee(),
            Some(dec("300000")),
            &VariablePayRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.variable_payable, dec("10000"));
        assert_eq!(result.achievement_ratio, Some(dec("1.5")));
    }

    #[test]
    fn test_over_achievement_allowed_up_to_cap() {
        let rules = VariablePayRules {
            allow_over_achievement: true,
            max_achievement_ratio: Some(dec("1.2")),
            ..VariablePayRules::default()
        };
        let result = calculate_variable_pay(&sales_employee(), Some(dec("300000")), &rules, 1)
            .unwrap();
        assert_eq!(result.variable_payable, dec("12000"));
    }

    #[test]
    fn test_over_achievement_without_cap_is_unbounded() {
        let rules = VariablePayRules {
            allow_over_achievement: true,
            ..VariablePayRules::default()
        };
        let result = calculate_variable_pay(&sales_employee(), Some(dec("400000")), &rules, 1)
            .unwrap();
        assert_eq!(result.variable_payable, dec("20000"));
    }

    #[test]
    fn test_payout_percentage_scales_result() {
        let rules = VariablePayRules {
            payout_percentage: dec("50"),
            ..VariablePayRules::default()
        };
        let result = calculate_variable_pay(&sales_employee(), Some(dec("200000")), &rules, 1)
            .unwrap();
        assert_eq!(result.variable_payable, dec("5000"));
    }

    #[test]
    fn test_missing_achievement_pays_nothing() {
        let result =
            calculate_variable_pay(&sales_employee(), None, &VariablePayRules::default(), 1)
                .unwrap();
        assert_eq!(result.variable_payable, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("No sales achievement"));
    }

    #[test]
    fn test_missing_target_pays_nothing() {
        let mut employee = sales_employee();
        employee.sales_target = None;
        let result = calculate_variable_pay(
            &employee,
            Some(dec("1000")),
            &VariablePayRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.variable_payable, Decimal::ZERO);
        assert!(result.achievement_ratio.is_none());
    }

    #[test]
    fn test_zero_target_pays_nothing() {
        let mut employee = sales_employee();
        employee.sales_target = Some(Decimal::ZERO);
        let result = calculate_variable_pay(
            &employee,
            Some(dec("1000")),
            &VariablePayRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.variable_payable, Decimal::ZERO);
    }

    #[test]
    fn test_negative_achievement_clamps_to_zero() {
        let result = calculate_variable_pay(
            &sales_employee(),
            Some(dec("-5000")),
            &VariablePayRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.variable_payable, Decimal::ZERO);
    }

    #[test]
    fn test_highest_reached_tier_is_reported() {
        let result =
            calculate_variable_pay(&sales_employee(), Some(dec("170000")), &tiered_rules(), 1)
                .unwrap();
        assert_eq!(result.tier.as_deref(), Some("silver"));
        assert_eq!(result.audit_step.output["tier"], "silver");
    }

    #[test]
    fn test_no_tier_below_lowest_threshold() {
        let result =
            calculate_variable_pay(&sales_employee(), Some(dec("20000")), &tiered_rules(), 1)
                .unwrap();
        assert!(result.tier.is_none());
    }

    #[test]
    fn test_huge_achievement_against_tiny_target_is_an_error() {
        let mut employee = sales_employee();
        employee.sales_target = Some(dec("0.0000000000000000000000001"));
        let rules = VariablePayRules {
            allow_over_achievement: true,
            ..VariablePayRules::default()
        };

        let result = calculate_variable_pay(&employee, Some(dec("1000000000000")), &rules, 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
