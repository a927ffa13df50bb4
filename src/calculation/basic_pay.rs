//! Attendance-scaled basic pay.
//!
//! Basic pay is the monthly base salary pro-rated by paid attendance:
//! `base_salary / calendar_days x (present + 0.5 x half_days)`.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSummary, AuditStep, Employee};

use super::round_money;

/// The result of the basic pay calculation.
#[derive(Debug, Clone)]
pub struct BasicPayResult {
    /// Per-day rate at full precision.
    pub per_day_rate: Decimal,
    /// Paid attendance days.
    pub effective_days: Decimal,
    /// Basic payable, rounded to two decimal places.
    pub basic_payable: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates attendance-scaled basic pay.
///
/// The per-day rate is never rounded before it is multiplied by the
/// effective days; only `basic_payable` is rounded.
///
/// # Errors
///
/// Returns `CalculationError` if the period has no working days.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_basic_pay;
/// use payroll_engine::models::{AttendanceSummary, Employee};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee::new("emp_001", Decimal::new(50_000, 0));
/// let summary = AttendanceSummary {
///     present_days: 28,
///     half_days: 2,
///     absent_days: 1,
///     leave_days: 0,
///     unrecorded_days: 0,
///     working_days_in_period: 31,
/// };
///
/// let result = calculate_basic_pay(&employee, &summary, 1).unwrap();
/// assert_eq!(result.basic_payable, Decimal::from_str("46774.19").unwrap());
/// ```
pub fn calculate_basic_pay(
    employee: &Employee,
    summary: &AttendanceSummary,
    step_number: u32,
) -> EngineResult<BasicPayResult> {
    if summary.working_days_in_period == 0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "period for employee '{}' has no working days",
                employee.id
            ),
        });
    }

    let per_day_rate = employee.base_salary / Decimal::from(summary.working_days_in_period);
    let effective_days = summary.effective_days();
    let basic_payable = round_money(per_day_rate * effective_days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "basic_pay".to_string(),
        rule_name: "Attendance-Scaled Basic Pay".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.to_string(),
            "working_days": summary.working_days_in_period,
            "present_days": summary.present_days,
            "half_days": summary.half_days
        }),
        output: serde_json::json!({
            "per_day_rate": round_money(per_day_rate).to_string(),
            "effective_days": effective_days.to_string(),
            "basic_payable": basic_payable.to_string()
        }),
        reasoning: format!(
            "{} / {} days = {} per day x {} effective days = {}",
            employee.base_salary,
            summary.working_days_in_period,
            round_money(per_day_rate),
            effective_days,
            basic_payable
        ),
    };

    Ok(BasicPayResult {
        per_day_rate,
        effective_days,
        basic_payable,
        audit_step,
    })
}
