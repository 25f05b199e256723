//! Check-sequence scenarios shared by the transition and scheduler tests.

use serde::Deserialize;

use beacon_core::models::{LifecycleState, MonitorSignal};

/// A run of check outcomes and the signals each one must raise.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckScenario {
    pub name: String,
    pub alert_after: u32,
    /// `true` is a successful check.
    pub checks: Vec<bool>,
    /// Expected signal after each check, same length as `checks`.
    pub signals: Vec<Option<MonitorSignal>>,
    pub final_lifecycle: LifecycleState,
    pub final_failures: u32,
}

/// Every scenario under `test-fixtures/scenarios/`.
pub fn load_scenarios() -> Vec<CheckScenario> {
    crate::list_fixtures("scenarios")
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            crate::load_fixture(&format!("scenarios/{name}"))
        })
        .collect()
}
