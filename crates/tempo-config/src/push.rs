//! Push-channel (server-initiated event stream) configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_events_path() -> String {
    "/api/events".to_string()
}

const fn default_reconnect_attempts() -> u32 {
    5
}

const fn default_reconnect_backoff_ms() -> u64 {
    2_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PushConfig {
    /// Path of the event stream endpoint, relative to the engine base URL.
    #[serde(default = "default_events_path")]
    pub events_path: String,

    /// Consecutive reconnect attempts before the push channel gives up.
    #[serde(default = "default_reconnect_attempts")]
    pub reconnect_attempts: u32,

    /// Fixed delay between reconnect attempts, in milliseconds.
    #[serde(default = "default_reconnect_backoff_ms")]
    pub reconnect_backoff_ms: u64,
}

impl PushConfig {
    #[must_use]
    pub const fn reconnect_backoff(&self) -> Duration {
        Duration::from_millis(self.reconnect_backoff_ms)
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            events_path: default_events_path(),
            reconnect_attempts: default_reconnect_attempts(),
            reconnect_backoff_ms: default_reconnect_backoff_ms(),
        }
    }
}
