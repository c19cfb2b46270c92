//! The push channel: server-initiated events independent of the
//! request/response cycle.
//!
//! The wire format is newline-delimited JSON with an internal `type` tag:
//!
//! ```text
//! {"type":"welcomeMessage","ascii":"...","description":"..."}
//! {"type":"rawEngineLog","message":"depth 12 score cp 34"}
//! ```
//!
//! [`PushConnector`] is the transport seam; [`HttpPushConnector`] reads the
//! stream over a long-lived HTTP GET. [`run_push_channel`] supervises a
//! connector with a bounded number of reconnect attempts and a fixed backoff.
//! Welcome deduplication is not handled here: the aggregator's latch decides,
//! so a reconnect that re-delivers the banner stays idempotent.

use crate::error::EngineError;
use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tempo_config::PushConfig;
use tokio::sync::mpsc;

/// One event delivered by the push channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PushEvent {
    /// One-time session banner. Idempotently ignorable on re-delivery.
    WelcomeMessage { ascii: String, description: String },
    /// A plain engine log line.
    RawEngineLog { message: String },
}

/// Transport seam for the push channel.
///
/// `connect` establishes one connection and forwards events into `tx` until
/// the connection drops: `Ok(())` for a clean end of stream, `Err` for a
/// transport failure. Reconnection is the supervisor's job.
#[async_trait]
pub trait PushConnector: Send + Sync {
    async fn connect(&self, tx: mpsc::Sender<PushEvent>) -> Result<(), EngineError>;
}

/// Reconnection policy for [`run_push_channel`].
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl From<&PushConfig> for ReconnectPolicy {
    fn from(config: &PushConfig) -> Self {
        Self {
            max_attempts: config.reconnect_attempts,
            backoff: config.reconnect_backoff(),
        }
    }
}

/// Supervise a push connector for the lifetime of a session.
///
/// Counts consecutive failed-or-dropped connections; the counter resets after
/// any connection that was established (`connect` returned `Ok`). Returns
/// `Ok(())` once the consumer side of `tx` is gone, or
/// [`EngineError::ReconnectExhausted`] when the attempt budget runs out.
pub async fn run_push_channel<C: PushConnector>(
    connector: C,
    tx: mpsc::Sender<PushEvent>,
    policy: ReconnectPolicy,
) -> Result<(), EngineError> {
    let mut failures = 0;
    loop {
        match connector.connect(tx.clone()).await {
            Ok(()) => {
                failures = 0;
                tracing::info!("push channel closed, reconnecting");
            }
            Err(err) => {
                failures += 1;
                tracing::warn!(%err, failures, "push channel connection failed");
            }
        }
        if tx.is_closed() {
            return Ok(());
        }
        if failures > policy.max_attempts {
            return Err(EngineError::ReconnectExhausted {
                attempts: policy.max_attempts,
            });
        }
        tokio::time::sleep(policy.backoff).await;
    }
}

/// Push connector over a streaming HTTP GET delivering NDJSON events.
#[derive(Debug, Clone)]
pub struct HttpPushConnector {
    http: reqwest::Client,
    url: String,
}

impl HttpPushConnector {
    #[must_use]
    pub fn new(base_url: &str, config: &PushConfig) -> Self {
        Self {
            // No whole-request timeout here: the stream is long-lived.
            http: reqwest::Client::new(),
            url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                config.events_path
            ),
        }
    }
}

#[async_trait]
impl PushConnector for HttpPushConnector {
    async fn connect(&self, tx: mpsc::Sender<PushEvent>) -> Result<(), EngineError> {
        let response = self.http.get(&self.url).send().await?.error_for_status()?;
        let mut chunks = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = chunks.next().await {
            buf.extend_from_slice(&chunk?);
            while let Some(newline) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=newline).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<PushEvent>(line) {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            // Consumer gone; treat as a clean shutdown.
                            return Ok(());
                        }
                    }
                    Err(err) => tracing::warn!(%err, "dropping malformed push event"),
                }
            }
        }
        Ok(())
    }
}
