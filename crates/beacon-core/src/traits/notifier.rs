use serde::{Deserialize, Serialize};

use crate::errors::BeaconResult;
use crate::models::{Incident, IncidentUpdate};

/// Receives incident lifecycle events. All methods default to no-ops so
/// notifiers only override what they care about.
///
/// Fire-and-forget: an `Err` is logged by the dispatcher and never rolls
/// back engine state.
pub trait IIncidentNotifier: Send + Sync {
    fn name(&self) -> &str {
        "notifier"
    }
    fn on_incident_opened(&self, _incident: &Incident) -> BeaconResult<()> {
        Ok(())
    }
    fn on_incident_updated(&self, _incident: &Incident, _update: &IncidentUpdate) -> BeaconResult<()> {
        Ok(())
    }
    fn on_incident_resolved(&self, _incident: &Incident, _update: &IncidentUpdate) -> BeaconResult<()> {
        Ok(())
    }
}

/// A rendered message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery boundary for outbound notices (email, webhook, ...).
pub trait INoticeSink: Send + Sync {
    fn deliver(&self, notice: &OutboundNotice) -> BeaconResult<()>;
}
