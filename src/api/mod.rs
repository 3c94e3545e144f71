//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for the salary deduction
//! calculator, work record management, and monthly payroll.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, PayrollRequest, RecordRequest, RecordsQuery};
pub use response::{ApiError, ApiErrorResponse, DeductionResponse};
pub use state::AppState;
