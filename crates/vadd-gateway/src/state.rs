//! Shared application state

use vadd_compute::AdditionService;

/// State shared across all request handlers
pub struct AppState {
    /// Addition service bound to the backend selected at startup
    pub service: AdditionService,
}

impl AppState {
    pub fn new(service: AdditionService) -> Self {
        Self { service }
    }
}
