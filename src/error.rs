//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing or generating payroll.

use thiserror::Error;

use crate::models::PayrollStatus;

/// The main error type for the Payroll Engine.
///
/// Structural failures (a bad period, a broken policy file) reject a whole
/// request. Per-employee problems inside a generation batch are reported as
/// values on the generation report instead of through this type.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriod { month: 13, year: 2025 };
/// assert_eq!(error.to_string(), "Invalid payroll period: month 13, year 2025");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested month or year is out of range.
    #[error("Invalid payroll period: month {month}, year {year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// Strict mode was requested but no configured policy covers the period.
    #[error("No configured compensation policy in force for {month:02}/{year}")]
    PolicyUnavailable {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// A compensation policy violated one of its invariants.
    #[error("Invalid compensation policy '{name}': {message}")]
    InvalidPolicy {
        /// The name of the offending policy.
        name: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}': {message}")]
    InvalidEmployee {
        /// The employee that was invalid.
        employee_id: String,
        /// A description of what made the employee invalid.
        message: String,
    },

    /// A requested employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee identifier.
        employee_id: String,
    },

    /// The store rejected a second payroll record for the same period.
    #[error("Payroll already exists for employee '{employee_id}' in {month:02}/{year}")]
    StorageConflict {
        /// The employee the record belongs to.
        employee_id: String,
        /// The period month.
        month: u32,
        /// The period year.
        year: i32,
    },

    /// A payroll record was not found.
    #[error("Payroll record not found: {id}")]
    PayrollNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// A status change that the payroll lifecycle does not allow.
    #[error("Cannot move payroll from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: PayrollStatus,
        /// The requested status.
        to: PayrollStatus,
    },

    /// The record is in a state that forbids removal.
    #[error("Payroll record {id} is {status} and cannot be deleted")]
    PayrollLocked {
        /// The record identifier.
        id: String,
        /// The status that locks it.
        status: PayrollStatus,
    },

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// A stable, machine-readable code for this error.
    ///
    /// Used in HTTP error bodies and in per-employee failure reports.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidPeriod { .. } => "INVALID_PERIOD",
            EngineError::PolicyUnavailable { .. } => "POLICY_UNAVAILABLE",
            EngineError::InvalidPolicy { .. } => "INVALID_POLICY",
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::InvalidEmployee { .. } => "INVALID_EMPLOYEE",
            EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            EngineError::StorageConflict { .. } => "DUPLICATE_PAYROLL",
            EngineError::PayrollNotFound { .. } => "PAYROLL_NOT_FOUND",
            EngineError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            EngineError::PayrollLocked { .. } => "PAYROLL_LOCKED",
            EngineError::Storage { .. } => "STORAGE_ERROR",
            EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
