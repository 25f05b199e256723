//! Wiring for the engine services over one set of stores.

use std::sync::{Arc, Mutex};

use beacon_core::config::EngineConfig;
use beacon_core::ids::MonitorId;
use beacon_core::traits::{IIncidentNotifier, INoticeSink};
use beacon_observability::metrics::MetricsCollector;

use crate::catalog::Catalog;
use crate::console::OperatorConsole;
use crate::evaluator::StatusEvaluator;
use crate::incidents::IncidentManager;
use crate::locks::KeyedLocks;
use crate::notify::{NotificationDispatcher, SubscriberFanout};
use crate::status_page::StatusPageBuilder;
use crate::stores::Stores;
use crate::subscribers::SubscriptionService;
use crate::uptime::UptimeCalculator;

pub type SharedMetrics = Arc<Mutex<MetricsCollector>>;

/// Every engine service, sharing stores, locks and metrics.
pub struct BeaconEngine {
    pub stores: Stores,
    pub config: EngineConfig,
    pub metrics: SharedMetrics,
    pub incidents: Arc<IncidentManager>,
    pub evaluator: Arc<StatusEvaluator>,
    pub catalog: Arc<Catalog>,
    pub subscriptions: Arc<SubscriptionService>,
}

impl BeaconEngine {
    pub fn new(stores: Stores, config: EngineConfig, dispatcher: NotificationDispatcher) -> Self {
        Self::with_metrics(stores, config, dispatcher, SharedMetrics::default())
    }

    pub fn with_metrics(
        stores: Stores,
        config: EngineConfig,
        dispatcher: NotificationDispatcher,
        metrics: SharedMetrics,
    ) -> Self {
        let dispatcher = Arc::new(dispatcher);
        let monitor_locks = Arc::new(KeyedLocks::<MonitorId>::new(
            "monitor",
            config.lock_retry_attempts,
            config.lock_retry_backoff_ms,
        ));
        let incidents = Arc::new(IncidentManager::new(
            stores.clone(),
            config.clone(),
            dispatcher,
            metrics.clone(),
        ));
        let evaluator = Arc::new(StatusEvaluator::new(
            stores.monitors.clone(),
            incidents.clone(),
            monitor_locks.clone(),
            metrics.clone(),
        ));
        let catalog = Arc::new(Catalog::new(stores.clone(), config.clone(), monitor_locks));
        let subscriptions = Arc::new(SubscriptionService::new(stores.subscribers.clone()));
        Self {
            stores,
            config,
            metrics,
            incidents,
            evaluator,
            catalog,
            subscriptions,
        }
    }

    /// Dispatcher with the subscriber fan-out plus any extra notifiers.
    pub fn default_dispatcher(
        stores: &Stores,
        sink: Arc<dyn INoticeSink>,
        extra: Vec<Arc<dyn IIncidentNotifier>>,
        metrics: SharedMetrics,
    ) -> NotificationDispatcher {
        let mut dispatcher = NotificationDispatcher::with_metrics(metrics);
        dispatcher.register(Arc::new(SubscriberFanout::new(stores.subscribers.clone(), sink)));
        for notifier in extra {
            dispatcher.register(notifier);
        }
        dispatcher
    }

    pub fn console(&self) -> OperatorConsole {
        OperatorConsole::new(self.catalog.clone(), self.incidents.clone())
    }

    pub fn status_page(&self) -> StatusPageBuilder {
        StatusPageBuilder::new(self.stores.clone(), self.config.recent_incident_days)
    }

    pub fn uptime(&self) -> UptimeCalculator {
        UptimeCalculator::new(self.stores.monitors.clone())
    }

    pub fn metrics_snapshot(&self) -> MetricsCollector {
        self.metrics.lock().map(|m| m.clone()).unwrap_or_default()
    }
}
