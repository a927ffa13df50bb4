//! Payroll record administration.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollFilter, PayrollRecord, PayrollStatus};
use crate::storage::PayrollStore;

/// Lists, inspects and moves payroll records through their lifecycle.
#[derive(Clone)]
pub struct PayrollAdmin {
    store: Arc<dyn PayrollStore>,
}

impl PayrollAdmin {
    /// Creates an admin over a store.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self { store }
    }

    /// Lists records matching `filter`, newest period first, then by employee.
    pub async fn list(&self, filter: &PayrollFilter) -> EngineResult<Vec<PayrollRecord>> {
        let mut records = self.store.list_payroll(filter).await?;
        records.sort_by(|a, b| {
            (Reverse(a.year), Reverse(a.month), &a.employee_id).cmp(&(
                Reverse(b.year),
                Reverse(b.month),
                &b.employee_id,
            ))
        });
        Ok(records)
    }

    /// Returns a record by id.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` if no record has this id.
    pub async fn get(&self, id: Uuid) -> EngineResult<PayrollRecord> {
        self.store
            .get_payroll(id)
            .await?
            .ok_or_else(|| EngineError::PayrollNotFound { id: id.to_string() })
    }

    /// Moves a record to `status`. Only the status changes.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` or `InvalidStatusTransition`.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: PayrollStatus,
    ) -> EngineResult<PayrollRecord> {
        let record = self.store.update_payroll_status(id, status).await?;
        info!(
            payroll_id = %id,
            employee_id = %record.employee_id,
            status = %status,
            "Payroll status updated"
        );
        Ok(record)
    }

    /// Deletes a record so its period can be regenerated.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound`, or `PayrollLocked` for a paid record.
    pub async fn delete(&self, id: Uuid) -> EngineResult<PayrollRecord> {
        let record = self.store.delete_payroll(id).await?;
        info!(
            payroll_id = %id,
            employee_id = %record.employee_id,
            month = record.month,
            year = record.year,
            "Payroll deleted"
        );
        Ok(record)
    }
}
