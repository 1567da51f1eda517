//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::CheckinWindow;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Check-in tolerance applied to the trainer attendance feed
    pub checkin_window: CheckinWindow,
}

impl AppState {
    /// Create application state with the check-in window taken from the
    /// environment.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            checkin_window: CheckinWindow::from_env(),
        }
    }

    /// Create application state with an explicit check-in window.
    pub fn with_checkin_window(repository: Arc<dyn FullRepository>, window: CheckinWindow) -> Self {
        Self {
            repository,
            checkin_window: window,
        }
    }
}
