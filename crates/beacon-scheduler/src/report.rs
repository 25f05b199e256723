//! Tick report, serialized as the trigger surface's JSON response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beacon_core::ids::MonitorId;
use beacon_core::models::{CheckClassification, MonitorSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Checked less than one interval ago.
    NotDue,
    /// A previous check of this monitor is still running.
    InFlight,
    /// Due, but beyond the per-tick cap. Picked up next tick.
    BatchLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonitorOutcome {
    Skipped {
        reason: SkipReason,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_in_secs: Option<i64>,
    },
    Checked {
        classification: CheckClassification,
        http_status: Option<u16>,
        response_time_ms: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signal: Option<MonitorSignal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        incident_error: Option<String>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub id: MonitorId,
    pub url: String,
    #[serde(flatten)]
    pub outcome: MonitorOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub timestamp: DateTime<Utc>,
    pub total_monitors: usize,
    pub checked: usize,
    pub skipped: usize,
    pub failed: usize,
    pub results: Vec<MonitorReport>,
}

impl TickReport {
    pub fn new(timestamp: DateTime<Utc>, results: Vec<MonitorReport>) -> Self {
        let mut checked = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for r in &results {
            match r.outcome {
                MonitorOutcome::Checked { .. } => checked += 1,
                MonitorOutcome::Skipped { .. } => skipped += 1,
                MonitorOutcome::Failed { .. } => failed += 1,
            }
        }
        Self {
            timestamp,
            total_monitors: results.len(),
            checked,
            skipped,
            failed,
            results,
        }
    }

    pub fn outcome_of(&self, id: &MonitorId) -> Option<&MonitorOutcome> {
        self.results.iter().find(|r| &r.id == id).map(|r| &r.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_json_shape() {
        let results = vec![
            MonitorReport {
                id: "a".into(),
                url: "https://a.example.com".into(),
                outcome: MonitorOutcome::Skipped {
                    reason: SkipReason::NotDue,
                    due_in_secs: Some(42),
                },
            },
            MonitorReport {
                id: "b".into(),
                url: "https://b.example.com".into(),
                outcome: MonitorOutcome::Checked {
                    classification: CheckClassification::Down,
                    http_status: Some(500),
                    response_time_ms: 31,
                    error: None,
                    signal: None,
                    incident_error: None,
                },
            },
            MonitorReport {
                id: "c".into(),
                url: "https://c.example.com".into(),
                outcome: MonitorOutcome::Failed {
                    error: "boom".into(),
                },
            },
        ];
        let report = TickReport::new(Utc::now(), results);
        assert_eq!(
            (report.total_monitors, report.checked, report.skipped, report.failed),
            (3, 1, 1, 1)
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["status"], "skipped");
        assert_eq!(json["results"][0]["reason"], "not_due");
        assert_eq!(json["results"][1]["classification"], "down");
        assert!(json["results"][1].get("signal").is_none());
        assert_eq!(json["results"][2]["error"], "boom");
    }
}
