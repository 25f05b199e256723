//! reqwest-backed probe with per-monitor method, timeout, and user agent.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use beacon_core::config::ProbeConfig;
use beacon_core::errors::{BeaconResult, ProbeError};
use beacon_core::models::{CheckResult, HttpMethod, Monitor};
use beacon_core::traits::IProbe;

/// Convert a string into a ProbeError::Request.
fn request_err(reason: String) -> ProbeError {
    ProbeError::Request { reason }
}

/// HTTP probe. Owns one pooled client shared by every check.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(config: &ProbeConfig) -> BeaconResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| request_err(e.to_string()))?;
        Ok(Self { client })
    }

    /// Send the request; any HTTP status is `Ok`.
    async fn send(&self, monitor: &Monitor) -> Result<u16, ProbeError> {
        let response = self
            .client
            .request(to_reqwest_method(monitor.method), &monitor.url)
            .timeout(monitor.timeout())
            .send()
            .await
            .map_err(|e| classify(&e, monitor))?;
        Ok(response.status().as_u16())
    }
}

#[async_trait]
impl IProbe for HttpProbe {
    async fn probe(&self, monitor: &Monitor) -> CheckResult {
        let started = Instant::now();
        let outcome = self.send(monitor).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let now = Utc::now();

        match outcome {
            Ok(status) => CheckResult::from_response(monitor, status, elapsed_ms, now),
            Err(err) => {
                tracing::debug!(
                    monitor_id = %monitor.id,
                    url = %monitor.url,
                    error = %err,
                    "probe transport failure"
                );
                CheckResult::from_transport_error(monitor, &err, elapsed_ms, now)
            }
        }
    }
}

fn classify(err: &reqwest::Error, monitor: &Monitor) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout {
            timeout_ms: monitor.timeout().as_millis() as u64,
        }
    } else if err.is_connect() {
        ProbeError::Connect {
            reason: root_cause(err),
        }
    } else {
        request_err(root_cause(err))
    }
}

/// reqwest's top-level message is generic; the innermost source names the failure.
fn root_cause(err: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = err;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_method_maps_to_reqwest() {
        for (ours, theirs) in [
            (HttpMethod::Get, "GET"),
            (HttpMethod::Head, "HEAD"),
            (HttpMethod::Post, "POST"),
            (HttpMethod::Put, "PUT"),
            (HttpMethod::Patch, "PATCH"),
            (HttpMethod::Delete, "DELETE"),
            (HttpMethod::Options, "OPTIONS"),
        ] {
            assert_eq!(to_reqwest_method(ours).as_str(), theirs);
            assert_eq!(ours.as_str(), theirs);
        }
    }
}
