//! Request types for the Payroll Engine API.
//!
//! The generation endpoint takes a [`GenerationRequest`] directly; listing
//! takes a [`PayrollFilter`] from the query string.
//!
//! [`GenerationRequest`]: crate::generation::GenerationRequest
//! [`PayrollFilter`]: crate::models::PayrollFilter

use serde::{Deserialize, Serialize};

use crate::models::PayrollStatus;

/// Request body for `PUT /payroll/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The status to move the record to.
    pub status: PayrollStatus,
}
