//! Provident fund and employee insurance deductions.
//!
//! Both are charged on the employee's full monthly base salary, not on the
//! attendance-adjusted gross.

use rust_decimal::Decimal;

use crate::config::CompensationPolicy;
use crate::models::AuditStep;

use super::round_money;

/// The result of the statutory deduction calculation.
#[derive(Debug, Clone)]
pub struct StatutoryDeductionResult {
    /// Provident fund deduction.
    pub pf_deduction: Decimal,
    /// Employee insurance deduction.
    pub esi_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates PF and insurance deductions from the base salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_statutory_deductions;
/// use payroll_engine::config::CompensationPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_statutory_deductions(
///     Decimal::new(50_000, 0),
///     &CompensationPolicy::fallback(),
///     3,
/// );
/// assert_eq!(result.pf_deduction, Decimal::new(6_000, 0));
/// assert_eq!(result.esi_deduction, Decimal::new(375, 0));
/// ```
pub fn calculate_statutory_deductions(
    base_salary: Decimal,
    policy: &CompensationPolicy,
    step_number: u32,
) -> StatutoryDeductionResult {
    let pf_deduction = round_money(base_salary * policy.pf_percentage / Decimal::ONE_HUNDRED);
    let esi_deduction =
        round_money(base_salary * policy.insurance_percentage / Decimal::ONE_HUNDRED);

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Provident Fund and Insurance".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "pf_percentage": policy.pf_percentage.to_string(),
            "insurance_percentage": policy.insurance_percentage.to_string()
        }),
        output: serde_json::json!({
            "pf_deduction": pf_deduction.to_string(),
            "esi_deduction": esi_deduction.to_string()
        }),
        reasoning: format!(
            "PF {}% and insurance {}% of base salary {}",
            policy.pf_percentage, policy.insurance_percentage, base_salary
        ),
    };

    StatutoryDeductionResult {
        pf_deduction,
        esi_deduction,
        audit_step,
    }
}
