use async_trait::async_trait;

use crate::models::{CheckResult, Monitor};

/// Performs one health check against a monitor's target.
///
/// Implementations never fail: transport errors become a failed `CheckResult`.
#[async_trait]
pub trait IProbe: Send + Sync {
    async fn probe(&self, monitor: &Monitor) -> CheckResult;
}
