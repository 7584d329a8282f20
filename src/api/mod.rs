//! HTTP API for the payroll service.
//!
//! This module provides the JSON endpoints under `/api` for managing
//! plumbers, jobs and payroll periods and for reading payroll summaries.

mod handlers;
mod request;
mod response;
mod shutdown;
mod state;

pub use handlers::create_router;
pub use request::{
    CommissionRequest, CreateJobRequest, CreatePayrollRequest, CreatePlumberRequest,
    DEFAULT_COMMISSION_RATE,
};
pub use response::{ApiError, ApiErrorResponse, CommissionPreview};
pub use shutdown::{shutdown_signal, wait_for_signal};
pub use state::AppState;
