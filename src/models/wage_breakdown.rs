//! Wage breakdown models for the Payroll Engine.
//!
//! This module contains the [`WageBreakdown`] type produced by the wage
//! calculator, together with the audit structures that explain every figure
//! in it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FixedDeductions;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that were computed and kept but deserve a human
/// look, such as a negative net salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one wage computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Gross pay and deductions for one employee and one period.
///
/// Every monetary field is rounded to two decimal places; `per_day_rate` is
/// reported rounded but the figures derived from it were computed at full
/// precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBreakdown {
    /// Base salary divided by the calendar days of the period.
    pub per_day_rate: Decimal,
    /// Present days plus half of the half-days.
    pub effective_days: Decimal,
    /// Attendance-scaled basic pay.
    pub basic_payable: Decimal,
    /// Target-based variable pay.
    pub variable_payable: Decimal,
    /// Basic plus variable pay.
    pub gross_salary: Decimal,
    /// Provident fund, charged on the full base salary.
    pub pf_deduction: Decimal,
    /// Employee insurance, charged on the full base salary.
    pub esi_deduction: Decimal,
    /// Progressive income tax for the period.
    pub tax_deduction: Decimal,
    /// Externally supplied deductions.
    pub fixed_deductions: FixedDeductions,
    /// Sum of every deduction.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions. May be negative.
    pub net_salary: Decimal,
    /// How the figures were reached.
    pub audit: AuditTrace,
}
