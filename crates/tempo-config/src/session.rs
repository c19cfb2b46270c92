//! Turn-controller pacing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Short debounce between an accepted player move and the engine-move
/// request, so the display surface can render the move first.
const fn default_move_request_delay_ms() -> u64 {
    400
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Delay before an engine-move request is issued, in milliseconds.
    #[serde(default = "default_move_request_delay_ms")]
    pub move_request_delay_ms: u64,
}

impl SessionConfig {
    #[must_use]
    pub const fn move_request_delay(&self) -> Duration {
        Duration::from_millis(self.move_request_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            move_request_delay_ms: default_move_request_delay_ms(),
        }
    }
}
