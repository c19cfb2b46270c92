//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use tempo_config::TempoConfig;

#[test]
fn loads_engine_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[engine]
base_url = "http://chess.local:9000"
request_timeout_ms = 5000
move_request_retries = 2
"#,
        )?;

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.engine.base_url, "http://chess.local:9000");
        assert_eq!(config.engine.request_timeout_ms, 5000);
        assert_eq!(config.engine.move_request_retries, 2);
        Ok(())
    });
}

#[test]
fn loads_push_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[push]
events_path = "/stream"
reconnect_attempts = 10
reconnect_backoff_ms = 500
"#,
        )?;

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.push.events_path, "/stream");
        assert_eq!(config.push.reconnect_attempts, 10);
        assert_eq!(config.push.reconnect_backoff_ms, 500);
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[engine]
base_url = "http://engine:8575"

[push]
reconnect_attempts = 3

[session]
move_request_delay_ms = 250
"#,
        )?;

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.engine.base_url, "http://engine:8575");
        // Unset fields fall back to defaults.
        assert_eq!(config.engine.request_timeout_ms, 10_000);
        assert_eq!(config.push.reconnect_attempts, 3);
        assert_eq!(config.session.move_request_delay_ms, 250);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_ENGINE__BASE_URL", "http://from-env:1234");

        jail.create_file(
            "config.toml",
            r#"
[engine]
base_url = "http://from-toml:1234"
request_timeout_ms = 7000
"#,
        )?;

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TEMPO_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.engine.base_url, "http://from-env:1234");
        // TOML value not overridden by env should remain
        assert_eq!(config.engine.request_timeout_ms, 7000);
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_SESSION__MOVE_REQUEST_DELAY_MS", "50");

        // No TOML file -- just defaults + env
        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Env::prefixed("TEMPO_").split("__"))
            .extract()?;

        assert_eq!(config.session.move_request_delay_ms, 50);
        Ok(())
    });
}

#[test]
fn blank_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_ENGINE__BASE_URL", "  ");

        let error = TempoConfig::load().expect_err("blank base_url must fail validation");
        assert!(error.to_string().contains("engine.base_url"));
        Ok(())
    });
}

#[test]
fn relative_events_path_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_PUSH__EVENTS_PATH", "stream");

        let error = TempoConfig::load().expect_err("relative events_path must fail validation");
        assert!(error.to_string().contains("push.events_path"));
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TEMPO_ENGINE__BASE_URLL", "http://typo:1");

        let config: TempoConfig = Figment::from(Serialized::defaults(TempoConfig::default()))
            .merge(Env::prefixed("TEMPO_").split("__"))
            .extract()?;

        assert_eq!(
            config.engine.base_url, "http://127.0.0.1:8575",
            "typo'd env var should be silently ignored by figment"
        );
        Ok(())
    });
}
