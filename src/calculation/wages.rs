//! The wage calculator.
//!
//! [`compute_wages`] combines attendance, employee data and the compensation
//! policy into a [`WageBreakdown`]. It performs no I/O and returns identical
//! output for identical input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CompensationPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, AuditStep, AuditTrace, AuditWarning, Employee, FixedDeductions,
    MAX_MONEY_AMOUNT, WageBreakdown, check_amount,
};

use super::{
    calculate_basic_pay, calculate_income_tax, calculate_statutory_deductions,
    calculate_variable_pay, checked_amount, round_money,
};

/// Warning code raised when deductions exceed gross salary.
pub const NEGATIVE_NET_SALARY: &str = "NEGATIVE_NET_SALARY";

/// Warning code raised when the employee has no paid attendance.
pub const ZERO_ATTENDANCE: &str = "ZERO_ATTENDANCE";

/// Per-employee figures supplied from outside the engine for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayAdjustments {
    /// Sales achieved in the period, for target-based variable pay.
    pub sales_achieved: Option<Decimal>,
    /// Fixed deductions for the period.
    #[serde(flatten)]
    pub deductions: FixedDeductions,
}

impl PayAdjustments {
    /// Checks the supplied figures for one employee.
    ///
    /// Every amount must be non-negative and at most [`MAX_MONEY_AMOUNT`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` naming the first offending field.
    pub fn validate(&self, employee_id: &str) -> EngineResult<()> {
        if let Some(sales_achieved) = self.sales_achieved {
            check_amount(employee_id, "sales achieved", sales_achieved)?;
        }
        let deductions = &self.deductions;
        check_amount(employee_id, "professional tax", deductions.professional_tax)?;
        check_amount(employee_id, "tds", deductions.tds)?;
        check_amount(employee_id, "penalties", deductions.penalties)?;
        check_amount(employee_id, "advance payment", deductions.advance_payment)?;
        check_amount(employee_id, "other deductions", deductions.other_deductions)?;
        Ok(())
    }
}

/// Computes gross pay, deductions and net pay for one employee and period.
///
/// The steps are:
/// 1. basic pay scaled by effective attendance days
/// 2. target-based variable pay
/// 3. PF and insurance on the full base salary
/// 4. progressive tax on the annualized gross
/// 5. fixed deductions, totals and net salary
///
/// Each monetary field is rounded when it is assigned. Gross, total
/// deductions and net are sums of the rounded fields, so a breakdown always
/// adds up exactly. A negative net salary is returned as computed, with a
/// `NEGATIVE_NET_SALARY` warning.
///
/// # Errors
///
/// Returns `InvalidEmployee` for negative or oversized salary figures and
/// adjustments, and `CalculationError` for a period without working days or
/// a variable payout that takes the gross beyond [`MAX_MONEY_AMOUNT`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{compute_wages, PayAdjustments};
/// use payroll_engine::config::CompensationPolicy;
/// use payroll_engine::models::{AttendanceSummary, Employee};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(30_000, 0));
/// let summary = AttendanceSummary {
///     present_days: 30,
///     half_days: 0,
///     absent_days: 0,
///     leave_days: 0,
///     unrecorded_days: 0,
///     working_days_in_period: 30,
/// };
///
/// let breakdown = compute_wages(
///     &employee,
///     &summary,
///     &CompensationPolicy::fallback(),
///     &PayAdjustments::default(),
/// )
/// .unwrap();
/// assert_eq!(breakdown.gross_salary, Decimal::new(30_000, 0));
/// ```
pub fn compute_wages(
    employee: &Employee,
    summary: &AttendanceSummary,
    policy: &CompensationPolicy,
    adjustments: &PayAdjustments,
) -> EngineResult<WageBreakdown> {
    employee.validate()?;
    adjustments.validate(&employee.id)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let basic = calculate_basic_pay(employee, summary, 1)?;
    steps.push(basic.audit_step);

    let variable = calculate_variable_pay(
        employee,
        adjustments.sales_achieved,
        &policy.variable_pay,
        2,
    )?;
    steps.push(variable.audit_step);

    let gross_salary = checked_amount(
        basic.basic_payable.checked_add(variable.variable_payable),
        "gross salary",
    )?;
    if gross_salary > MAX_MONEY_AMOUNT {
        return Err(EngineError::CalculationError {
            message: format!(
                "gross salary {} for employee '{}' exceeds {}",
                gross_salary, employee.id, MAX_MONEY_AMOUNT
            ),
        });
    }

    let statutory = calculate_statutory_deductions(employee.base_salary, policy, 3);
    steps.push(statutory.audit_step);

    let tax = calculate_income_tax(gross_salary, &policy.tax_slabs, 4);
    steps.push(tax.audit_step);

    let fixed_deductions = FixedDeductions {
        professional_tax: round_money(adjustments.deductions.professional_tax),
        tds: round_money(adjustments.deductions.tds),
        penalties: round_money(adjustments.deductions.penalties),
        advance_payment: round_money(adjustments.deductions.advance_payment),
        other_deductions: round_money(adjustments.deductions.other_deductions),
    };

    let fixed_total = checked_amount(fixed_deductions.checked_total(), "fixed deductions")?;
    let total_deductions = checked_amount(
        [statutory.esi_deduction, tax.tax_deduction, fixed_total]
            .into_iter()
            .try_fold(statutory.pf_deduction, |sum, amount| sum.checked_add(amount)),
        "total deductions",
    )?;
    let net_salary = checked_amount(
        gross_salary.checked_sub(total_deductions),
        "net salary",
    )?;

    steps.push(AuditStep {
        step_number: 5,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "pf_deduction": statutory.pf_deduction.to_string(),
            "esi_deduction": statutory.esi_deduction.to_string(),
            "tax_deduction": tax.tax_deduction.to_string(),
            "fixed_deductions": fixed_total.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "Gross {} minus deductions {} = {}",
            gross_salary, total_deductions, net_salary
        ),
    });

    if basic.effective_days.is_zero() {
        warnings.push(AuditWarning {
            code: ZERO_ATTENDANCE.to_string(),
            message: format!(
                "Employee '{}' has no paid attendance in the period",
                employee.id
            ),
            severity: "medium".to_string(),
        });
    }

    if net_salary.is_sign_negative() && !net_salary.is_zero() {
        warnings.push(AuditWarning {
            code: NEGATIVE_NET_SALARY.to_string(),
            message: format!(
                "Deductions {} exceed gross salary {} for employee '{}'",
                total_deductions, gross_salary, employee.id
            ),
            severity: "high".to_string(),
        });
    }

    Ok(WageBreakdown {
        per_day_rate: round_money(basic.per_day_rate),
        effective_days: basic.effective_days,
        basic_payable: basic.basic_payable,
        variable_payable: variable.variable_payable,
        gross_salary,
        pf_deduction: statutory.pf_deduction,
        esi_deduction: statutory.esi_deduction,
        tax_deduction: tax.tax_deduction,
        fixed_deductions,
        total_deductions,
        net_salary,
        audit: AuditTrace { steps, warnings },
    })
}
