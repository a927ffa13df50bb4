//! Storage layer for the Payroll Engine.
//!
//! Defines the [`PayrollStore`] interface through which the engine reads
//! employees and attendance and persists payroll records, plus an in-memory
//! implementation.
//!
//! # Uniqueness
//!
//! Implementations must enforce at most one payroll record per
//! `(employee_id, month, year)` atomically: `insert_payroll` has to reject a
//! second record for the same key with `StorageConflict`, even when two
//! inserts race. The orchestrator's existence check is only a shortcut.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, PayrollFilter, PayrollRecord, PayrollStatus};

pub use memory::{MemoryStore, SeedData};

/// Persistence operations used by payroll generation and administration.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Returns the employees with the given ids, or every employee for `None`.
    ///
    /// Unknown ids are left out of the result rather than reported as errors.
    async fn find_employees(&self, ids: Option<&[String]>) -> EngineResult<Vec<Employee>>;

    /// Returns an employee's attendance records dated within `[from, to]`.
    async fn find_attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Returns the payroll record for an employee and period, if any.
    async fn find_payroll(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>>;

    /// Inserts a new payroll record.
    ///
    /// # Errors
    ///
    /// Returns `StorageConflict` if a record already exists for the same
    /// employee and period.
    async fn insert_payroll(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Returns a payroll record by id, if any.
    async fn get_payroll(&self, id: Uuid) -> EngineResult<Option<PayrollRecord>>;

    /// Returns the payroll records matching `filter`, in no particular order.
    async fn list_payroll(&self, filter: &PayrollFilter) -> EngineResult<Vec<PayrollRecord>>;

    /// Moves a record to a new status.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` for an unknown id and
    /// `InvalidStatusTransition` if the lifecycle forbids the move.
    async fn update_payroll_status(
        &self,
        id: Uuid,
        status: PayrollStatus,
    ) -> EngineResult<PayrollRecord>;

    /// Removes a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` for an unknown id and `PayrollLocked` for a
    /// record that has been paid.
    async fn delete_payroll(&self, id: Uuid) -> EngineResult<PayrollRecord>;
}
