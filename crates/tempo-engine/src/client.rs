//! HTTP client for the remote engine's request channel.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tempo_config::EngineConfig;
use tempo_core::EngineReadiness;

#[derive(Serialize)]
struct FenBody<'a> {
    fen: &'a str,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
}

#[derive(Deserialize)]
struct MoveResponse {
    #[serde(rename = "move", default)]
    mv: Option<String>,
}

/// Client for the engine's HTTP API.
///
/// One whole-request timeout applies to every call (configured at the reqwest
/// client level). Move requests get one transparent retry on transport
/// failure; nothing else is ever retried here.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    base_url: String,
    move_request_retries: u32,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            move_request_retries: config.move_request_retries,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query engine readiness.
    ///
    /// Non-2xx and transport errors are failures; an unrecognized status
    /// string resolves to [`EngineReadiness::Unavailable`].
    pub async fn status(&self) -> Result<EngineReadiness, EngineError> {
        let body: StatusResponse = self
            .http
            .get(format!("{}/api/engine-status", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(EngineReadiness::from_remote_status(&body.status))
    }

    /// Request a move for the given position.
    ///
    /// An empty or missing `move` field is [`EngineError::NoMove`]; that is a
    /// protocol answer and is not retried. Transport failures are retried
    /// once (configurable).
    pub async fn request_move(&self, fen: &str) -> Result<String, EngineError> {
        let mut attempt = 0;
        loop {
            match self.request_move_once(fen).await {
                Err(EngineError::Transport(err)) if attempt < self.move_request_retries => {
                    attempt += 1;
                    tracing::warn!(%err, attempt, "engine move request failed, retrying");
                }
                other => return other,
            }
        }
    }

    async fn request_move_once(&self, fen: &str) -> Result<String, EngineError> {
        let body: MoveResponse = self
            .http
            .post(format!("{}/api/engine-move", self.base_url))
            .json(&FenBody { fen })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match body.mv {
            Some(mv) if !mv.trim().is_empty() => Ok(mv.trim().to_string()),
            _ => Err(EngineError::NoMove),
        }
    }

    /// Tell the engine the board was reset to the given position.
    ///
    /// Best-effort: callers log a failure and move on.
    pub async fn notify_reset(&self, fen: &str) -> Result<(), EngineError> {
        self.http
            .post(format!("{}/api/engine-reset", self.base_url))
            .json(&FenBody { fen })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
