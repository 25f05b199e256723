use std::sync::Arc;

use beacon_core::errors::BeaconResult;
use beacon_core::models::{Incident, IncidentUpdate};
use beacon_core::traits::{IIncidentNotifier, INoticeSink, ISubscriberStore, OutboundNotice};

/// Renders one notice per verified subscriber of the incident's project.
pub struct SubscriberFanout {
    subscribers: Arc<dyn ISubscriberStore>,
    sink: Arc<dyn INoticeSink>,
}

impl SubscriberFanout {
    pub fn new(subscribers: Arc<dyn ISubscriberStore>, sink: Arc<dyn INoticeSink>) -> Self {
        Self { subscribers, sink }
    }

    /// Delivers to every recipient even if some fail; reports the first error.
    fn broadcast(&self, incident: &Incident, subject: String, body: String) -> BeaconResult<()> {
        let recipients = self.subscribers.list_verified(&incident.project_id)?;
        let mut first_error = None;
        for subscriber in recipients {
            let notice = OutboundNotice {
                to: subscriber.email,
                subject: subject.clone(),
                body: body.clone(),
            };
            if let Err(e) = self.sink.deliver(&notice) {
                tracing::warn!(to = %notice.to, error = %e, "notice delivery failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl IIncidentNotifier for SubscriberFanout {
    fn name(&self) -> &str {
        "subscriber_fanout"
    }

    fn on_incident_opened(&self, incident: &Incident) -> BeaconResult<()> {
        self.broadcast(
            incident,
            format!("[{}] {}", incident.status.as_str(), incident.title),
            incident.description.clone(),
        )
    }

    fn on_incident_updated(&self, incident: &Incident, update: &IncidentUpdate) -> BeaconResult<()> {
        self.broadcast(
            incident,
            format!("[{}] {}", update.status.as_str(), incident.title),
            update.message.clone(),
        )
    }

    fn on_incident_resolved(&self, incident: &Incident, update: &IncidentUpdate) -> BeaconResult<()> {
        self.broadcast(
            incident,
            format!("[resolved] {}", incident.title),
            update.message.clone(),
        )
    }
}

/// Sink that only logs. Used when no delivery channel is configured.
#[derive(Debug, Default)]
pub struct LogSink;

impl INoticeSink for LogSink {
    fn deliver(&self, notice: &OutboundNotice) -> BeaconResult<()> {
        tracing::info!(to = %notice.to, subject = %notice.subject, "notice queued");
        Ok(())
    }
}
