//! Persisted payroll records and their lifecycle status.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceSummary, PayPeriod, WageBreakdown};

/// Lifecycle status of a payroll record.
///
/// Records are created as `Pending`. The allowed moves are
/// `Pending -> Approved | Cancelled` and `Approved -> Paid | Cancelled`;
/// `Paid` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    /// Generated, awaiting approval.
    Pending,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
    /// Withdrawn.
    Cancelled,
}

impl PayrollStatus {
    /// Returns true if a record in this status may move to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollStatus;
    ///
    /// assert!(PayrollStatus::Pending.can_transition_to(PayrollStatus::Approved));
    /// assert!(!PayrollStatus::Paid.can_transition_to(PayrollStatus::Cancelled));
    /// ```
    pub fn can_transition_to(self, next: PayrollStatus) -> bool {
        use PayrollStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Cancelled) | (Approved, Paid) | (Approved, Cancelled)
        )
    }

    /// Returns true for statuses that admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, PayrollStatus::Paid | PayrollStatus::Cancelled)
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayrollStatus::Pending => "PENDING",
            PayrollStatus::Approved => "APPROVED",
            PayrollStatus::Paid => "PAID",
            PayrollStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// Deductions supplied from outside the engine for one employee and period.
///
/// Every field defaults to zero when not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedDeductions {
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Tax deducted at source.
    pub tds: Decimal,
    /// Disciplinary or other penalties.
    pub penalties: Decimal,
    /// Recovery of salary advances.
    pub advance_payment: Decimal,
    /// Anything else.
    pub other_deductions: Decimal,
}

impl FixedDeductions {
    /// Sum of all fixed deductions.
    ///
    /// # Panics
    ///
    /// Panics if the sum overflows; use [`checked_total`](Self::checked_total)
    /// for unvalidated input.
    pub fn total(&self) -> Decimal {
        self.professional_tax + self.tds + self.penalties + self.advance_payment + self.other_deductions
    }

    /// Sum of all fixed deductions, or `None` on overflow.
    pub fn checked_total(&self) -> Option<Decimal> {
        [self.tds, self.penalties, self.advance_payment, self.other_deductions]
            .into_iter()
            .try_fold(self.professional_tax, |sum, amount| sum.checked_add(amount))
    }
}

/// A generated payroll record, unique per `(employee_id, month, year)`.
///
/// The numeric fields never change after creation; only `status` moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Record identifier.
    pub id: Uuid,
    /// The employee this record pays.
    pub employee_id: String,
    /// Period month (1-12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Calendar days in the period.
    pub working_days: u32,
    /// Days recorded as present.
    pub days_present: u32,
    /// Days recorded as half-day.
    pub half_days: u32,
    /// Days counted as absent.
    pub days_absent: u32,
    /// Days recorded as leave.
    pub leave_days: u32,
    /// Paid attendance (`present + 0.5 x half`).
    pub effective_days: Decimal,
    /// Monthly base salary the record was computed from.
    pub base_salary: Decimal,
    /// Attendance-scaled basic pay.
    pub basic_payable: Decimal,
    /// Target-based variable pay.
    pub variable_payable: Decimal,
    /// Basic plus variable pay.
    pub gross_salary: Decimal,
    /// Provident fund deduction.
    pub pf_deduction: Decimal,
    /// Employee insurance deduction.
    pub esi_deduction: Decimal,
    /// Income tax for the period.
    pub tax_deduction: Decimal,
    /// Externally supplied deductions.
    #[serde(flatten)]
    pub fixed_deductions: FixedDeductions,
    /// Sum of every deduction.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions. May be negative.
    pub net_salary: Decimal,
    /// Label of the compensation policy used.
    pub policy: String,
    /// Lifecycle status.
    pub status: PayrollStatus,
    /// When the record was generated.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a `Pending` record from a computed wage breakdown.
    pub fn pending(
        employee_id: &str,
        period: &PayPeriod,
        summary: &AttendanceSummary,
        base_salary: Decimal,
        breakdown: &WageBreakdown,
        policy: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month: period.month(),
            year: period.year(),
            working_days: summary.working_days_in_period,
            days_present: summary.present_days,
            half_days: summary.half_days,
            days_absent: summary.absent_days,
            leave_days: summary.leave_days,
            effective_days: breakdown.effective_days,
            base_salary,
            basic_payable: breakdown.basic_payable,
            variable_payable: breakdown.variable_payable,
            gross_salary: breakdown.gross_salary,
            pf_deduction: breakdown.pf_deduction,
            esi_deduction: breakdown.esi_deduction,
            tax_deduction: breakdown.tax_deduction,
            fixed_deductions: breakdown.fixed_deductions.clone(),
            total_deductions: breakdown.total_deductions,
            net_salary: breakdown.net_salary,
            policy: policy.into(),
            status: PayrollStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// The uniqueness key of this record.
    pub fn period_key(&self) -> (String, u32, i32) {
        (self.employee_id.clone(), self.month, self.year)
    }
}

/// Filter for listing payroll records. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFilter {
    /// Only records for this month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Only records for this year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Only records for this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl PayrollFilter {
    /// Returns true if the record satisfies every set criterion.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        self.month.is_none_or(|m| record.month == m)
            && self.year.is_none_or(|y| record.year == y)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|id| record.employee_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_allowed_transitions() {
        use PayrollStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Approved.can_transition_to(Paid));
        assert!(Approved.can_transition_to(Cancelled));
    }

    #[test]
    fn test_forbidden_transitions() {
        use PayrollStatus::*;
        assert!(!Pending.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Pending));
        for next in [Pending, Approved, Paid, Cancelled] {
            assert!(!Paid.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(PayrollStatus::Paid.is_terminal());
        assert!(PayrollStatus::Cancelled.is_terminal());
        assert!(!PayrollStatus::Pending.is_terminal());
    }

    #[test]
    fn test_status_serialization_matches_display() {
        for status in [
            PayrollStatus::Pending,
            PayrollStatus::Approved,
            PayrollStatus::Paid,
            PayrollStatus::Cancelled,
        ] {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }

    #[test]
    fn test_fixed_deductions_default_to_zero() {
        let deductions: FixedDeductions = serde_json::from_str(r#"{ "tds": "150.50" }"#).unwrap();
        assert_eq!(deductions.professional_tax, Decimal::ZERO);
        assert_eq!(deductions.total(), dec("150.50"));
    }

    #[test]
    fn test_fixed_deductions_total() {
        let deductions = FixedDeductions {
            professional_tax: dec("200"),
            tds: dec("1000"),
            penalties: dec("50"),
            advance_payment: dec("2500"),
            other_deductions: dec("10.25"),
        };
        assert_eq!(deductions.total(), dec("3760.25"));
        assert_eq!(deductions.checked_total(), Some(dec("3760.25")));
    }

    #[test]
    fn test_checked_total_reports_overflow() {
        let deductions = FixedDeductions {
            tds: Decimal::MAX,
            penalties: Decimal::MAX,
            ..FixedDeductions::default()
        };
        assert_eq!(deductions.checked_total(), None);
    }

    #[test]
    fn test_filter_deserializes_partial_query() {
        let filter: PayrollFilter = serde_json::from_str(r#"{"month": 3}"#).unwrap();
        assert_eq!(filter.month, Some(3));
        assert!(filter.year.is_none());
        assert!(filter.employee_id.is_none());
    }
}
