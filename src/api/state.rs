//! Application state for the payroll API.

use std::sync::Arc;

use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service every handler works through.
#[derive(Clone)]
pub struct AppState {
    /// The payroll service shared by all handlers.
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
