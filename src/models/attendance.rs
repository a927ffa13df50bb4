//! Attendance records and the per-period summary derived from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The recorded status of an employee for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Worked the full day.
    Present,
    /// Did not work and was not on leave.
    Absent,
    /// Worked half of the day.
    HalfDay,
    /// On leave. Leave days are not paid through basic pay.
    Leave,
}

/// One attendance entry for one employee on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Creates a new attendance record.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            status,
        }
    }
}

/// Attendance counts for one employee over one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceSummary;
/// use rust_decimal::Decimal;
///
/// let summary = AttendanceSummary {
///     present_days: 28,
///     half_days: 2,
///     absent_days: 1,
///     leave_days: 0,
///     unrecorded_days: 0,
///     working_days_in_period: 31,
/// };
/// assert_eq!(summary.effective_days(), Decimal::from(29));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days recorded as present.
    pub present_days: u32,
    /// Days recorded as half-day.
    pub half_days: u32,
    /// Days counted as absent.
    pub absent_days: u32,
    /// Days recorded as leave.
    pub leave_days: u32,
    /// Days of the period with no record at all.
    pub unrecorded_days: u32,
    /// Calendar days in the period, used as the per-day rate divisor.
    pub working_days_in_period: u32,
}

impl AttendanceSummary {
    /// Paid attendance: present days plus half of the half-days.
    pub fn effective_days(&self) -> Decimal {
        Decimal::from(self.present_days) + Decimal::from(self.half_days) / Decimal::TWO
    }
}
