//! # tempo-config
//!
//! Layered configuration loading for tempo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEMPO_*` prefix, `__` as separator)
//! 2. Project-level `.tempo/config.toml`
//! 3. User-level `~/.config/tempo/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEMPO_ENGINE__BASE_URL` -> `engine.base_url`,
//! `TEMPO_PUSH__RECONNECT_ATTEMPTS` -> `push.reconnect_attempts`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tempo_config::TempoConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = TempoConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = TempoConfig::load().expect("config");
//!
//! println!("Engine at {}", config.engine.base_url);
//! ```

mod engine;
mod error;
mod push;
mod session;

pub use engine::EngineConfig;
pub use error::ConfigError;
pub use push::PushConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TempoConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub push: PushConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl TempoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`TEMPO_*` prefix)
    /// 2. `.tempo/config.toml` (project-local)
    /// 3. `~/.config/tempo/config.toml` (user-global)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical entry
    /// point for the CLI.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tempo/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("TEMPO_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tempo").join("config.toml"))
    }

    /// Reject values no source layer should be allowed to set.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.engine.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.request_timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.push.events_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "push.events_path".to_string(),
                reason: "must start with '/'".to_string(),
            });
        }
        Ok(())
    }
}
