//! Progressive income tax.
//!
//! The period's gross salary is annualized (`x 12`), taxed through the
//! policy's slabs, and the annual tax is divided back by twelve.

use rust_decimal::Decimal;

use crate::config::TaxSlab;
use crate::models::AuditStep;

use super::round_money;

/// Number of pay periods in a year.
pub const PERIODS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of the income tax calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Annualized income the slabs were applied to.
    pub annual_income: Decimal,
    /// Tax for the whole year, full precision.
    pub annual_tax: Decimal,
    /// Tax for the period, rounded to two decimal places.
    pub tax_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies progressive slabs to an annual income.
///
/// Slabs are walked in ascending order; each taxes only the part of the
/// income that falls inside `[min, max)`. Non-positive income yields zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::progressive_annual_tax;
/// use payroll_engine::config::TaxSlab;
/// use rust_decimal::Decimal;
///
/// let d = |v: i64| Decimal::new(v, 0);
/// let slabs = vec![
///     TaxSlab::new(d(0), Some(d(250_000)), d(0)),
///     TaxSlab::new(d(250_000), Some(d(500_000)), d(5)),
///     TaxSlab::new(d(500_000), Some(d(1_000_000)), d(20)),
///     TaxSlab::new(d(1_000_000), None, d(30)),
/// ];
/// assert_eq!(progressive_annual_tax(d(600_000), &slabs), d(32_500));
/// ```
pub fn progressive_annual_tax(annual_income: Decimal, slabs: &[TaxSlab]) -> Decimal {
    let mut tax = Decimal::ZERO;

    for slab in slabs {
        if annual_income <= slab.min {
            break;
        }
        let upper = slab.max.map_or(annual_income, |max| max.min(annual_income));
        tax += (upper - slab.min) * slab.rate_percent / Decimal::ONE_HUNDRED;
    }

    tax
}

/// Calculates the period's income tax from its gross salary.
pub fn calculate_income_tax(
    gross_salary: Decimal,
    slabs: &[TaxSlab],
    step_number: u32,
) -> IncomeTaxResult {
    let annual_income = gross_salary * PERIODS_PER_YEAR;
    let annual_tax = progressive_annual_tax(annual_income, slabs);
    let tax_deduction = round_money(annual_tax / PERIODS_PER_YEAR);

    let slab_count = slabs
        .iter()
        .filter(|slab| annual_income > slab.min)
        .count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "annual_income": annual_income.to_string(),
            "slabs": slabs.len()
        }),
        output: serde_json::json!({
            "slabs_applied": slab_count,
            "annual_tax": round_money(annual_tax).to_string(),
            "tax_deduction": tax_deduction.to_string()
        }),
        reasoning: format!(
            "Annual income {} spans {} slab(s), annual tax {} / 12 = {}",
            annual_income,
            slab_count,
            round_money(annual_tax),
            tax_deduction
        ),
    };

    IncomeTaxResult {
        annual_income,
        annual_tax,
        tax_deduction,
        audit_step,
    }
}
