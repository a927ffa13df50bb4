//! HTTP API module for the Payroll Engine.
//!
//! This module exposes payroll generation and record administration as
//! REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::StatusUpdateRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
