//! Attendance aggregation.
//!
//! Reduces an employee's raw attendance records for a period into the
//! counts the wage calculator needs.

use std::collections::BTreeMap;

use crate::config::UnrecordedDays;
use crate::models::{AttendanceRecord, AttendanceStatus, AttendanceSummary, PayPeriod};

/// Aggregates attendance records for one employee over a pay period.
///
/// Every calendar day of the period counts as a working day. Records that
/// belong to another employee or fall outside the period are ignored. When
/// several records exist for the same date, the last one supplied wins.
///
/// Days of the period without any record are reported as `unrecorded_days`
/// and, when `unrecorded` is [`UnrecordedDays::Absent`], also added to
/// `absent_days`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::config::UnrecordedDays;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus, PayPeriod};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(3, 2025).unwrap();
/// let records = vec![AttendanceRecord::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     AttendanceStatus::Present,
/// )];
///
/// let summary = aggregate_attendance("emp_001", &records, &period, UnrecordedDays::Ignore);
/// assert_eq!(summary.present_days, 1);
/// assert_eq!(summary.working_days_in_period, 31);
/// ```
pub fn aggregate_attendance(
    employee_id: &str,
    records: &[AttendanceRecord],
    period: &PayPeriod,
    unrecorded: UnrecordedDays,
) -> AttendanceSummary {
    let by_date: BTreeMap<_, _> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
        .map(|r| (r.date, r.status))
        .collect();

    let mut summary = AttendanceSummary {
        present_days: 0,
        half_days: 0,
        absent_days: 0,
        leave_days: 0,
        unrecorded_days: 0,
        working_days_in_period: period.days(),
    };

    for status in by_date.values() {
        match status {
            AttendanceStatus::Present => summary.present_days += 1,
            AttendanceStatus::HalfDay => summary.half_days += 1,
            AttendanceStatus::Absent => summary.absent_days += 1,
            AttendanceStatus::Leave => summary.leave_days += 1,
        }
    }

    // by_date only holds in-period dates, one per day
    summary.unrecorded_days = period.days() - by_date.len() as u32;
    if unrecorded == UnrecordedDays::Absent {
        summary.absent_days += summary.unrecorded_days;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord::new("emp_001", date(2025, 3, day), status)
    }

    fn march() -> PayPeriod {
        PayPeriod::new(3, 2025).unwrap()
    }

    /// 28 present, 2 half-days and 1 absence across March.
    fn full_march() -> Vec<AttendanceRecord> {
        (1..=31)
            .map(|day| match day {
                10 | 20 => record(day, AttendanceStatus::HalfDay),
                15 => record(day, AttendanceStatus::Absent),
                _ => record(day, AttendanceStatus::Present),
            })
            .collect()
    }

    #[test]
    fn test_counts_each_status() {
        let summary =
            aggregate_attendance("emp_001", &full_march(), &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.present_days, 28);
        assert_eq!(summary.half_days, 2);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.leave_days, 0);
        assert_eq!(summary.unrecorded_days, 0);
        assert_eq!(summary.working_days_in_period, 31);
    }

    #[test]
    fn test_leave_is_counted_separately() {
        let records = vec![
            record(3, AttendanceStatus::Leave),
            record(4, AttendanceStatus::Leave),
            record(5, AttendanceStatus::Present),
        ];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.leave_days, 2);
        assert_eq!(summary.present_days, 1);
        assert_eq!(summary.absent_days, 0);
    }

    #[test]
    fn test_records_outside_period_are_ignored() {
        let records = vec![
            AttendanceRecord::new("emp_001", date(2025, 2, 28), AttendanceStatus::Present),
            record(1, AttendanceStatus::Present),
            AttendanceRecord::new("emp_001", date(2025, 4, 1), AttendanceStatus::Present),
        ];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.present_days, 1);
    }

    #[test]
    fn test_other_employees_records_are_ignored() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            AttendanceRecord::new("emp_002", date(2025, 3, 2), AttendanceStatus::Present),
        ];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.present_days, 1);
    }

    #[test]
    fn test_duplicate_day_keeps_last_record() {
        let records = vec![
            record(7, AttendanceStatus::Absent),
            record(7, AttendanceStatus::Present),
        ];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.present_days, 1);
        assert_eq!(summary.absent_days, 0);
        assert_eq!(summary.unrecorded_days, 30);
    }

    #[test]
    fn test_unrecorded_days_ignored_by_default() {
        let records = vec![record(1, AttendanceStatus::Present)];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.unrecorded_days, 30);
        assert_eq!(summary.absent_days, 0);
    }

    #[test]
    fn test_unrecorded_days_counted_absent_when_configured() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Absent),
        ];
        let summary = aggregate_attendance("emp_001", &records, &march(), UnrecordedDays::Absent);
        assert_eq!(summary.unrecorded_days, 29);
        assert_eq!(summary.absent_days, 30);
    }

    #[test]
    fn test_no_records_at_all() {
        let summary = aggregate_attendance("emp_001", &[], &march(), UnrecordedDays::Ignore);
        assert_eq!(summary.present_days, 0);
        assert_eq!(summary.half_days, 0);
        assert_eq!(summary.unrecorded_days, 31);
    }
}
