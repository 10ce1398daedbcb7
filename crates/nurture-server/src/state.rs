//! Shared application state.

use nurture_core::NurtureConfig;
use nurture_runtime::Assistant;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: NurtureConfig,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(config: NurtureConfig, assistant: Assistant) -> Self {
        Self { config, assistant }
    }
}
