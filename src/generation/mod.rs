//! Payroll generation and administration.
//!
//! [`PayrollGenerator`] turns a `(month, year, employees)` request into
//! persisted payroll records, skipping employees that already have one for
//! the period. [`PayrollAdmin`] covers the record lifecycle afterwards:
//! listing, lookup, status changes and deletion.

mod admin;
mod generator;
mod report;

pub use admin::PayrollAdmin;
pub use generator::PayrollGenerator;
pub use report::{
    EmployeeFailure, EmployeeWarning, GenerationReport, GenerationRequest, SkipReason,
    SkippedEmployee,
};
