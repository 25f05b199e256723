//! Incident notification fan-out.
//!
//! Notifiers are isolated: an `Err` or a panic from one is logged, counted,
//! and never reaches the caller or the next notifier.

mod fanout;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use beacon_core::models::IncidentEvent;
use beacon_core::traits::IIncidentNotifier;
use beacon_observability::tracing_setup::events;

use crate::engine::SharedMetrics;

pub use fanout::{LogSink, SubscriberFanout};

#[derive(Default)]
pub struct NotificationDispatcher {
    notifiers: Vec<Arc<dyn IIncidentNotifier>>,
    metrics: Option<SharedMetrics>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: SharedMetrics) -> Self {
        Self {
            notifiers: Vec::new(),
            metrics: Some(metrics),
        }
    }

    pub fn register(&mut self, notifier: Arc<dyn IIncidentNotifier>) {
        self.notifiers.push(notifier);
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    /// Deliver `event` to every notifier. Returns how many failed.
    pub fn dispatch(&self, event: &IncidentEvent) -> usize {
        let mut failures = 0;
        for notifier in &self.notifiers {
            let outcome = catch_unwind(AssertUnwindSafe(|| match event {
                IncidentEvent::Opened { incident } => notifier.on_incident_opened(incident),
                IncidentEvent::Updated { incident, update } => {
                    notifier.on_incident_updated(incident, update)
                }
                IncidentEvent::Resolved { incident, update } => notifier.on_incident_resolved(incident, update),
            }));
            let reason = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(panic) => panic_message(panic.as_ref()),
            };
            events::notification_failed(notifier.name(), event.kind(), &reason);
            if let Some(ref metrics) = self.metrics {
                if let Ok(mut m) = metrics.lock() {
                    m.incidents.record_notification_failure();
                }
            }
            failures += 1;
        }
        failures
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("notifiers", &self.notifiers.iter().map(|n| n.name()).collect::<Vec<_>>())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
