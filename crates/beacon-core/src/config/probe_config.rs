use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP probe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub user_agent: String,
    /// Redirects followed before the last response is taken as the outcome.
    pub max_redirects: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
            max_redirects: defaults::DEFAULT_MAX_REDIRECTS,
        }
    }
}
