//! Periodic driver: one tick per interval until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::report::TickReport;
use crate::scheduler::Scheduler;

pub struct SchedulerDriver {
    scheduler: Arc<Scheduler>,
    period: Duration,
}

impl SchedulerDriver {
    pub fn new(scheduler: Arc<Scheduler>, tick_interval_secs: u64) -> Self {
        Self {
            scheduler,
            period: Duration::from_secs(tick_interval_secs.max(1)),
        }
    }

    pub fn with_period(scheduler: Arc<Scheduler>, period: Duration) -> Self {
        Self { scheduler, period }
    }

    /// Tick until `shutdown` fires. The first tick runs immediately; a tick in
    /// progress is finished before returning. Returns the number of ticks run.
    pub async fn run<F>(&self, shutdown: CancellationToken, mut on_report: F) -> usize
    where
        F: FnMut(&TickReport),
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    ticks += 1;
                    match self.scheduler.run_tick().await {
                        Ok(report) => on_report(&report),
                        Err(e) => tracing::error!(error = %e, "scheduler tick failed"),
                    }
                }
            }
        }
        tracing::info!(ticks, "scheduler driver stopped");
        ticks
    }
}
