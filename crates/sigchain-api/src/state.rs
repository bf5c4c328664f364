//! Application state shared across handlers

use sigchain_manager::DeviceManager;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The device manager behind every endpoint
    pub manager: Arc<DeviceManager>,
}

impl AppState {
    pub fn new(manager: Arc<DeviceManager>) -> Self {
        Self { manager }
    }
}
