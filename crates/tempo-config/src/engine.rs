//! Remote engine request-channel configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_base_url() -> String {
    "http://127.0.0.1:8575".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

/// One transparent retry on transport failure; a "no move" reply is a
/// protocol answer and is never retried.
const fn default_move_request_retries() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Base URL of the remote engine service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout for every engine call, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Extra attempts for a move request after a transport failure.
    #[serde(default = "default_move_request_retries")]
    pub move_request_retries: u32,
}

impl EngineConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            move_request_retries: default_move_request_retries(),
        }
    }
}
