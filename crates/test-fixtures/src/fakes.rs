//! Fakes for the probe, notifier, sink and incident store seams.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use beacon_core::errors::{BeaconResult, ProbeError, StoreError};
use beacon_core::ids::{ComponentId, IncidentId, MonitorId, ProjectId};
use beacon_core::models::{CheckResult, Incident, IncidentEvent, IncidentStatus, IncidentUpdate, Monitor};
use beacon_core::traits::{IIncidentNotifier, IIncidentStore, INoticeSink, IProbe, OutboundNotice};
use beacon_storage::MemoryStore;

/// One scripted probe outcome.
#[derive(Debug, Clone)]
pub enum ProbeStep {
    Status(u16),
    Transport(String),
    Panic,
    Delayed(Duration, Box<ProbeStep>),
}

impl ProbeStep {
    pub fn delayed(ms: u64, step: ProbeStep) -> Self {
        Self::Delayed(Duration::from_millis(ms), Box::new(step))
    }
}

/// Plays queued outcomes per monitor; answers `default_status` once a
/// queue runs dry.
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<MonitorId, VecDeque<ProbeStep>>>,
    calls: Mutex<HashMap<MonitorId, usize>>,
    default_status: u16,
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            default_status: 200,
        }
    }

    pub fn push(&self, monitor_id: &MonitorId, steps: impl IntoIterator<Item = ProbeStep>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(monitor_id.clone())
            .or_default()
            .extend(steps);
    }

    pub fn calls(&self, monitor_id: &MonitorId) -> usize {
        self.calls.lock().unwrap().get(monitor_id).copied().unwrap_or(0)
    }

    fn next_step(&self, monitor_id: &MonitorId) -> ProbeStep {
        *self.calls.lock().unwrap().entry(monitor_id.clone()).or_default() += 1;
        self.scripts
            .lock()
            .unwrap()
            .get_mut(monitor_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or(ProbeStep::Status(self.default_status))
    }
}

#[async_trait]
impl IProbe for ScriptedProbe {
    async fn probe(&self, monitor: &Monitor) -> CheckResult {
        let mut step = self.next_step(&monitor.id);
        loop {
            match step {
                ProbeStep::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    step = *inner;
                }
                ProbeStep::Status(status) => {
                    return CheckResult::from_response(monitor, status, 5, Utc::now());
                }
                ProbeStep::Transport(reason) => {
                    let error = ProbeError::Connect { reason };
                    return CheckResult::from_transport_error(monitor, &error, 5, Utc::now());
                }
                ProbeStep::Panic => panic!("scripted probe panic for {}", monitor.id),
            }
        }
    }
}

/// Records every incident event it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<IncidentEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<IncidentEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.lock().unwrap().iter().filter(|e| e.kind() == kind).count()
    }
}

impl IIncidentNotifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn on_incident_opened(&self, incident: &Incident) -> BeaconResult<()> {
        self.events.lock().unwrap().push(IncidentEvent::Opened {
            incident: incident.clone(),
        });
        Ok(())
    }

    fn on_incident_updated(&self, incident: &Incident, update: &IncidentUpdate) -> BeaconResult<()> {
        self.events.lock().unwrap().push(IncidentEvent::Updated {
            incident: incident.clone(),
            update: update.clone(),
        });
        Ok(())
    }

    fn on_incident_resolved(&self, incident: &Incident, update: &IncidentUpdate) -> BeaconResult<()> {
        self.events.lock().unwrap().push(IncidentEvent::Resolved {
            incident: incident.clone(),
            update: update.clone(),
        });
        Ok(())
    }
}

/// Fails every callback.
#[derive(Default)]
pub struct FailingNotifier;

impl IIncidentNotifier for FailingNotifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn on_incident_opened(&self, _incident: &Incident) -> BeaconResult<()> {
        Err(StoreError::Unavailable {
            reason: "mail relay down".to_string(),
        }
        .into())
    }

    fn on_incident_resolved(&self, _incident: &Incident, _update: &IncidentUpdate) -> BeaconResult<()> {
        Err(StoreError::Unavailable {
            reason: "mail relay down".to_string(),
        }
        .into())
    }
}

/// Panics on every callback.
#[derive(Default)]
pub struct PanickingNotifier;

impl IIncidentNotifier for PanickingNotifier {
    fn name(&self) -> &str {
        "panicking"
    }

    fn on_incident_opened(&self, incident: &Incident) -> BeaconResult<()> {
        panic!("notifier exploded on {}", incident.id)
    }

    fn on_incident_resolved(&self, incident: &Incident, _update: &IncidentUpdate) -> BeaconResult<()> {
        panic!("notifier exploded on {}", incident.id)
    }
}

/// Collects delivered notices.
#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<OutboundNotice>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<OutboundNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl INoticeSink for RecordingSink {
    fn deliver(&self, notice: &OutboundNotice) -> BeaconResult<()> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Incident store whose writes can be switched to fail.
pub struct FlakyIncidentStore {
    inner: Arc<MemoryStore>,
    fail_writes: AtomicBool,
}

impl FlakyIncidentStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> BeaconResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "incident store offline".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl IIncidentStore for FlakyIncidentStore {
    fn create_incident(&self, incident: &Incident, seed: &IncidentUpdate) -> BeaconResult<()> {
        self.check_writable()?;
        self.inner.create_incident(incident, seed)
    }

    fn get_incident(&self, id: &IncidentId) -> BeaconResult<Option<Incident>> {
        self.inner.get_incident(id)
    }

    fn find_active_incident(&self, component_id: &ComponentId) -> BeaconResult<Option<Incident>> {
        self.inner.find_active_incident(component_id)
    }

    fn append_update(
        &self,
        id: &IncidentId,
        message: &str,
        status: IncidentStatus,
    ) -> BeaconResult<(Incident, IncidentUpdate)> {
        self.check_writable()?;
        self.inner.append_update(id, message, status)
    }

    fn list_incidents(&self, project_id: &ProjectId) -> BeaconResult<Vec<Incident>> {
        self.inner.list_incidents(project_id)
    }

    fn list_updates(&self, id: &IncidentId) -> BeaconResult<Vec<IncidentUpdate>> {
        self.inner.list_updates(id)
    }
}
