//! Core data models for the Payroll Engine.
//!
//! This module contains the domain models shared by the calculator, the
//! generation orchestrator, the storage layer and the HTTP API.

mod attendance;
mod employee;
mod pay_period;
mod payroll_record;
mod wage_breakdown;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
pub(crate) use employee::check_amount;
pub use employee::{Employee, MAX_MONEY_AMOUNT};
pub use pay_period::{MAX_YEAR, MIN_YEAR, PayPeriod};
pub use payroll_record::{FixedDeductions, PayrollFilter, PayrollRecord, PayrollStatus};
pub use wage_breakdown::{AuditStep, AuditTrace, AuditWarning, WageBreakdown};
