//! Generation request and report types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::PayAdjustments;
use crate::config::PolicySource;
use crate::error::EngineError;
use crate::models::PayrollRecord;

/// A request to generate payroll for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Period month (1-12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Employees to generate for. `None` or an empty list means everyone.
    #[serde(default)]
    pub employee_ids: Option<Vec<String>>,
    /// Per-employee sales figures and fixed deductions, keyed by employee id.
    #[serde(default)]
    pub adjustments: HashMap<String, PayAdjustments>,
    /// Reject the request instead of falling back to the default policy.
    #[serde(default)]
    pub strict_policy: bool,
}

impl GenerationRequest {
    /// Creates a request for every employee in the given period.
    pub fn for_period(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            ..Self::default()
        }
    }

    /// Restricts the request to the given employees.
    pub fn with_employees<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.employee_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Why an employee was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// A record already existed when the employee was checked.
    AlreadyGenerated,
    /// Another request inserted the record between the check and the insert.
    LostInsertRace,
}

/// An employee for whom no record was created because one already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEmployee {
    /// The employee.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub reason: SkipReason,
    /// The existing record, when it could be looked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<Uuid>,
}

/// An employee whose payroll could not be computed or stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeFailure {
    /// The employee.
    pub employee_id: String,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl EmployeeFailure {
    pub(crate) fn from_error(employee_id: impl Into<String>, error: &EngineError) -> Self {
        Self {
            employee_id: employee_id.into(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// A calculation warning raised for one employee's new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWarning {
    /// The employee.
    pub employee_id: String,
    /// Warning code, e.g. `NEGATIVE_NET_SALARY`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// The outcome of a generation request.
///
/// Skips and per-employee failures do not make the request fail; they are
/// listed here next to the records that were created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Period month.
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Number of records created by this request.
    pub created_count: usize,
    /// The created records.
    pub records: Vec<PayrollRecord>,
    /// Employees that already had a record.
    pub skipped: Vec<SkippedEmployee>,
    /// Employees whose payroll failed.
    pub failures: Vec<EmployeeFailure>,
    /// Warnings on the created records.
    pub warnings: Vec<EmployeeWarning>,
    /// The compensation policy the records were computed with.
    pub policy: PolicySource,
}
