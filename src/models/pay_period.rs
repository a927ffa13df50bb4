//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, a validated calendar month
//! for which payroll is generated.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// The earliest year accepted for a payroll period.
pub const MIN_YEAR: i32 = 1900;

/// The latest year accepted for a payroll period.
pub const MAX_YEAR: i32 = 9999;

/// A single calendar month/year pair.
///
/// A `PayPeriod` can only be obtained through [`PayPeriod::new`], so every
/// instance has a month in `1..=12`, a four-digit year and resolved
/// first/last calendar dates.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2, 2024).unwrap();
/// assert_eq!(period.days(), 29);
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayPeriod {
    month: u32,
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PayPeriod {
    /// Validates a month/year pair and resolves its calendar boundaries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` when the month is outside `1..=12` or the
    /// year is outside [`MIN_YEAR`]`..=`[`MAX_YEAR`].
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { month, year };

        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end_date = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            month,
            year,
            start_date,
            end_date,
        })
    }

    /// The period month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The period year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first calendar day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last calendar day of the period (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> u32 {
        self.end_date.day()
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates over every calendar day of the period.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resolves_calendar_boundaries() {
        let period = PayPeriod::new(3, 2025).unwrap();
        assert_eq!(
            period.start_date(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
        assert_eq!(period.days(), 31);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let period = PayPeriod::new(12, 2025).unwrap();
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_february_day_counts() {
        assert_eq!(PayPeriod::new(2, 2024).unwrap().days(), 29);
        assert_eq!(PayPeriod::new(2, 2025).unwrap().days(), 28);
        assert_eq!(PayPeriod::new(2, 1900).unwrap().days(), 28);
    }

    #[test]
    fn test_thirty_day_month() {
        assert_eq!(PayPeriod::new(4, 2025).unwrap().days(), 30);
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        for month in [0, 13] {
            match PayPeriod::new(month, 2025) {
                Err(EngineError::InvalidPeriod { month: m, year }) => {
                    assert_eq!(m, month);
                    assert_eq!(year, 2025);
                }
                other => panic!("Expected InvalidPeriod, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_implausible_year_is_rejected() {
        assert!(PayPeriod::new(1, 25).is_err());
        assert!(PayPeriod::new(1, 1899).is_err());
        assert!(PayPeriod::new(1, 10_000).is_err());
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = PayPeriod::new(1, 2026).unwrap();
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_dates_yields_every_day() {
        let period = PayPeriod::new(6, 2025).unwrap();
        let dates: Vec<_> = period.dates().collect();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], period.start_date());
        assert_eq!(dates[29], period.end_date());
    }

    #[test]
    fn test_serialize_pay_period() {
        let period = PayPeriod::new(1, 2026).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"month\":1"));
        assert!(json.contains("\"start_date\":\"2026-01-01\""));
        assert!(json.contains("\"end_date\":\"2026-01-31\""));
    }
}
