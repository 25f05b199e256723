//! Wiring: store, engine, probe, scheduler.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use beacon_core::config::BeaconConfig;
use beacon_core::ids::ProjectId;
use beacon_core::traits::IProbe;
use beacon_engine::{BeaconEngine, LogSink, SharedMetrics, Stores};
use beacon_probe::HttpProbe;
use beacon_scheduler::{Scheduler, SchedulerDriver, TickReport};
use beacon_storage::MemoryStore;

use crate::catalog_file::CatalogFile;

pub struct Daemon {
    pub config: BeaconConfig,
    pub engine: BeaconEngine,
    pub scheduler: Arc<Scheduler>,
}

impl Daemon {
    /// In-memory daemon probing over HTTP.
    pub fn build(config: BeaconConfig, catalog: &CatalogFile) -> anyhow::Result<Self> {
        let probe = HttpProbe::new(&config.probe).context("building HTTP probe")?;
        Self::with_probe(config, catalog, Arc::new(probe))
    }

    pub fn with_probe(config: BeaconConfig, catalog: &CatalogFile, probe: Arc<dyn IProbe>) -> anyhow::Result<Self> {
        let stores = Stores::shared(Arc::new(MemoryStore::new()));
        let metrics = SharedMetrics::default();
        let dispatcher = BeaconEngine::default_dispatcher(&stores, Arc::new(LogSink), Vec::new(), metrics.clone());
        let engine = BeaconEngine::with_metrics(stores, config.engine.clone(), dispatcher, metrics);
        catalog.install(&engine.catalog)?;

        let scheduler = Arc::new(Scheduler::for_engine(config.scheduler.clone(), &engine, probe));
        Ok(Self {
            config,
            engine,
            scheduler,
        })
    }

    pub async fn run_once(&self) -> anyhow::Result<TickReport> {
        Ok(self.scheduler.run_tick().await?)
    }

    pub fn status_page_json(&self) -> anyhow::Result<String> {
        let page = self.engine.status_page().build(&ProjectId::default())?;
        Ok(serde_json::to_string_pretty(&page)?)
    }

    /// Tick on the configured interval until `shutdown` fires.
    pub async fn run_until(&self, shutdown: CancellationToken, print_status_page: bool) -> usize {
        let driver = SchedulerDriver::new(self.scheduler.clone(), self.config.scheduler.tick_interval_secs);
        driver
            .run(shutdown, |report| {
                tracing::info!(
                    checked = report.checked,
                    skipped = report.skipped,
                    failed = report.failed,
                    "tick"
                );
                if print_status_page {
                    match self.status_page_json() {
                        Ok(json) => println!("{json}"),
                        Err(e) => tracing::warn!(error = %e, "status page unavailable"),
                    }
                }
            })
            .await
    }
}
