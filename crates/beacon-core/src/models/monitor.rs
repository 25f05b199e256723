//! Monitor configuration and engine-owned run state.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXPECTED_STATUS, MAX_HTTP_STATUS, MAX_INTERVAL_SECS, MIN_HTTP_STATUS};
use crate::errors::ConfigError;
use crate::ids::{ComponentId, MonitorId, ProjectId};

/// HTTP method used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

/// Engine-owned classification of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Unknown,
    Up,
    Down,
    Paused,
}

/// Mutable run state written after every check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonitorRunState {
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_response_status: Option<u16>,
    pub consecutive_failures: u32,
    pub lifecycle: LifecycleState,
}

/// A configured periodic HTTP health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: MonitorId,
    pub project_id: ProjectId,
    pub url: String,
    pub method: HttpMethod,
    /// Polling interval in seconds.
    pub interval_secs: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    pub expected_status: Vec<u16>,
    /// Consecutive failures needed before the monitor is declared down.
    pub alert_after: u32,
    pub component_id: Option<ComponentId>,
    pub state: MonitorRunState,
    pub created_at: DateTime<Utc>,
}

impl Monitor {
    pub fn is_paused(&self) -> bool {
        self.state.lifecycle == LifecycleState::Paused
    }

    pub fn is_down(&self) -> bool {
        self.state.lifecycle == LifecycleState::Down
    }

    /// Saturates at `TimeDelta::MAX` for intervals beyond its range.
    pub fn interval(&self) -> TimeDelta {
        i64::try_from(self.interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Never checked, or at least one interval elapsed since the last check.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.state.last_checked_at {
            None => true,
            Some(last) => now.signed_duration_since(last) >= self.interval(),
        }
    }

    /// When the next check becomes due, `None` if it is due already.
    pub fn next_due_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.is_due(now) {
            return None;
        }
        self.state.last_checked_at.map(|last| {
            last.checked_add_signed(self.interval())
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    pub fn accepts_status(&self, status: u16) -> bool {
        self.expected_status.contains(&status)
    }

    /// Name used in incident titles when the monitor has no component name at hand.
    pub fn display_target(&self) -> &str {
        &self.url
    }
}

/// Operator-supplied monitor definition, validated before it becomes a `Monitor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSpec {
    #[serde(default)]
    pub project_id: ProjectId,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub interval_secs: u64,
    pub timeout_secs: u64,
    #[serde(default)]
    pub expected_status: Option<Vec<u16>>,
    #[serde(default)]
    pub alert_after: Option<u32>,
    #[serde(default)]
    pub component_id: Option<ComponentId>,
}

impl MonitorSpec {
    pub fn new(url: impl Into<String>, interval_secs: u64, timeout_secs: u64) -> Self {
        Self {
            project_id: ProjectId::default(),
            url: url.into(),
            method: HttpMethod::Get,
            interval_secs,
            timeout_secs,
            expected_status: None,
            alert_after: None,
            component_id: None,
        }
    }

    /// Validate and materialize a monitor with fresh run state.
    pub fn build(self, default_alert_after: u32, now: DateTime<Utc>) -> Result<Monitor, ConfigError> {
        let expected_status = self
            .expected_status
            .unwrap_or_else(|| DEFAULT_EXPECTED_STATUS.to_vec());
        let alert_after = self.alert_after.unwrap_or(default_alert_after);

        validate_target(&self.url)?;
        validate_timing(self.interval_secs, self.timeout_secs)?;
        validate_expected_status(&expected_status)?;
        validate_alert_after(alert_after)?;

        Ok(Monitor {
            id: MonitorId::generate(),
            project_id: self.project_id,
            url: self.url,
            method: self.method,
            interval_secs: self.interval_secs,
            timeout_secs: self.timeout_secs,
            expected_status,
            alert_after,
            component_id: self.component_id,
            state: MonitorRunState::default(),
            created_at: now,
        })
    }
}

/// Partial edit of a monitor's configuration. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorPatch {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub expected_status: Option<Vec<u16>>,
    pub alert_after: Option<u32>,
    /// `Some(None)` unlinks the component.
    pub component_id: Option<Option<ComponentId>>,
}

impl MonitorPatch {
    /// Apply onto a copy of `monitor`, validating the result.
    pub fn apply(&self, monitor: &Monitor) -> Result<Monitor, ConfigError> {
        let mut next = monitor.clone();
        if let Some(ref url) = self.url {
            next.url = url.clone();
        }
        if let Some(method) = self.method {
            next.method = method;
        }
        if let Some(interval) = self.interval_secs {
            next.interval_secs = interval;
        }
        if let Some(timeout) = self.timeout_secs {
            next.timeout_secs = timeout;
        }
        if let Some(ref codes) = self.expected_status {
            next.expected_status = codes.clone();
        }
        if let Some(alert_after) = self.alert_after {
            next.alert_after = alert_after;
        }
        if let Some(ref component) = self.component_id {
            next.component_id = component.clone();
        }

        validate_target(&next.url)?;
        validate_timing(next.interval_secs, next.timeout_secs)?;
        validate_expected_status(&next.expected_status)?;
        validate_alert_after(next.alert_after)?;
        Ok(next)
    }
}

fn validate_target(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidTarget {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidTarget {
                url: raw.to_string(),
                message: format!("unsupported scheme '{other}'"),
            })
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidTarget {
            url: raw.to_string(),
            message: "missing host".to_string(),
        });
    }
    Ok(())
}

fn validate_timing(interval_secs: u64, timeout_secs: u64) -> Result<(), ConfigError> {
    if interval_secs == 0 {
        return Err(ConfigError::invalid("interval_secs", "must be greater than 0"));
    }
    if interval_secs > MAX_INTERVAL_SECS {
        return Err(ConfigError::invalid(
            "interval_secs",
            format!("must not exceed {MAX_INTERVAL_SECS}s"),
        ));
    }
    if timeout_secs == 0 {
        return Err(ConfigError::invalid("timeout_secs", "must be greater than 0"));
    }
    if timeout_secs > interval_secs {
        return Err(ConfigError::invalid(
            "timeout_secs",
            format!("must not exceed interval ({interval_secs}s)"),
        ));
    }
    Ok(())
}

fn validate_expected_status(codes: &[u16]) -> Result<(), ConfigError> {
    if codes.is_empty() {
        return Err(ConfigError::invalid("expected_status", "must not be empty"));
    }
    if let Some(bad) = codes
        .iter()
        .find(|c| !(MIN_HTTP_STATUS..=MAX_HTTP_STATUS).contains(*c))
    {
        return Err(ConfigError::invalid(
            "expected_status",
            format!("{bad} is not an HTTP status code"),
        ));
    }
    Ok(())
}

fn validate_alert_after(alert_after: u32) -> Result<(), ConfigError> {
    if alert_after == 0 {
        return Err(ConfigError::invalid("alert_after", "must be at least 1"));
    }
    Ok(())
}
