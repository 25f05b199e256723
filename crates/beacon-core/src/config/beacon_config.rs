//! Top-level Beacon configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults::MAX_RECENT_INCIDENT_DAYS;
use super::{EngineConfig, ObservabilityConfig, ProbeConfig, SchedulerConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BEACON_*`)
/// 3. Config file (`beacon.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BeaconConfig {
    pub scheduler: SchedulerConfig,
    pub probe: ProbeConfig,
    pub engine: EngineConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tick_interval_secs: Option<u64>,
    pub max_concurrent_checks: Option<usize>,
    pub log_level: Option<String>,
}

impl BeaconConfig {
    /// Load configuration: defaults, then `path` if given, then env, then CLI.
    pub fn load(path: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Missing sections and keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `BEACON_*` variables resolved through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BEACON_TICK_INTERVAL_SECS") {
            self.scheduler.tick_interval_secs = parse_env("BEACON_TICK_INTERVAL_SECS", &v)?;
        }
        if let Some(v) = lookup("BEACON_MAX_MONITORS_PER_TICK") {
            self.scheduler.max_monitors_per_tick = parse_env("BEACON_MAX_MONITORS_PER_TICK", &v)?;
        }
        if let Some(v) = lookup("BEACON_MAX_CONCURRENT_CHECKS") {
            self.scheduler.max_concurrent_checks = parse_env("BEACON_MAX_CONCURRENT_CHECKS", &v)?;
        }
        if let Some(v) = lookup("BEACON_USER_AGENT") {
            self.probe.user_agent = v;
        }
        if let Some(v) = lookup("BEACON_DEFAULT_ALERT_AFTER") {
            self.engine.default_alert_after = parse_env("BEACON_DEFAULT_ALERT_AFTER", &v)?;
        }
        if let Some(v) = lookup("BEACON_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("BEACON_JSON_LOGS") {
            self.observability.json_logs = parse_env("BEACON_JSON_LOGS", &v)?;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(secs) = cli.tick_interval_secs {
            self.scheduler.tick_interval_secs = secs;
        }
        if let Some(n) = cli.max_concurrent_checks {
            self.scheduler.max_concurrent_checks = n;
        }
        if let Some(ref level) = cli.log_level {
            self.observability.log_level = level.clone();
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&str, u64); 4] = [
            ("scheduler.tick_interval_secs", self.scheduler.tick_interval_secs),
            (
                "scheduler.max_monitors_per_tick",
                self.scheduler.max_monitors_per_tick as u64,
            ),
            (
                "scheduler.max_concurrent_checks",
                self.scheduler.max_concurrent_checks as u64,
            ),
            ("engine.default_alert_after", self.engine.default_alert_after as u64),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if !(0..=MAX_RECENT_INCIDENT_DAYS).contains(&self.engine.recent_incident_days) {
            return Err(ConfigError::ValidationFailed {
                field: "engine.recent_incident_days".to_string(),
                message: format!("must be between 0 and {MAX_RECENT_INCIDENT_DAYS}"),
            });
        }
        if self.probe.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "probe.user_agent".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        message: format!("cannot parse '{raw}'"),
    })
}
