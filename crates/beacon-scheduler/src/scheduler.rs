//! The tick.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use tokio::sync::Semaphore;
use tracing::Instrument;

use beacon_core::config::SchedulerConfig;
use beacon_core::errors::BeaconResult;
use beacon_core::ids::MonitorId;
use beacon_core::models::{CheckClassification, Monitor};
use beacon_core::traits::{IMonitorStore, IProbe};
use beacon_engine::{BeaconEngine, SharedMetrics, StatusEvaluator};
use beacon_observability::tracing_setup::events;
use beacon_observability::{check_span, tick_span};
use beacon_probe::CheckExecutor;

use crate::report::{MonitorOutcome, MonitorReport, SkipReason, TickReport};

/// Removes the monitor from the in-flight set when the check ends,
/// including by panic.
struct InFlight {
    set: Arc<DashSet<MonitorId>>,
    id: MonitorId,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.set.remove(&self.id);
    }
}

pub struct Scheduler {
    config: SchedulerConfig,
    monitors: Arc<dyn IMonitorStore>,
    executor: Arc<CheckExecutor>,
    evaluator: Arc<StatusEvaluator>,
    in_flight: Arc<DashSet<MonitorId>>,
    permits: Arc<Semaphore>,
    metrics: SharedMetrics,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        monitors: Arc<dyn IMonitorStore>,
        executor: Arc<CheckExecutor>,
        evaluator: Arc<StatusEvaluator>,
        metrics: SharedMetrics,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_checks.max(1)));
        Self {
            config,
            monitors,
            executor,
            evaluator,
            in_flight: Arc::new(DashSet::new()),
            permits,
            metrics,
        }
    }

    /// Scheduler over an engine's stores and metrics.
    pub fn for_engine(config: SchedulerConfig, engine: &BeaconEngine, probe: Arc<dyn IProbe>) -> Self {
        let monitors = engine.stores.monitors.clone();
        let executor = Arc::new(CheckExecutor::new(probe, monitors.clone()));
        Self::new(config, monitors, executor, engine.evaluator.clone(), engine.metrics.clone())
    }

    /// Check every due monitor once. Safe to call repeatedly: monitors
    /// checked less than an interval ago are skipped.
    pub async fn run_tick(&self) -> BeaconResult<TickReport> {
        self.run_tick_at(Utc::now()).await
    }

    pub async fn run_tick_at(&self, now: DateTime<Utc>) -> BeaconResult<TickReport> {
        let started = Instant::now();
        let candidates = self.monitors.list_active_monitors()?;
        let span = tick_span!(candidates.len());

        let results = self.process(candidates, now).instrument(span).await;
        let report = TickReport::new(now, results);

        let duration_ms = started.elapsed().as_millis() as u64;
        self.record_metrics(&report, duration_ms);
        events::tick_completed(report.checked, report.skipped, report.failed, duration_ms);
        Ok(report)
    }

    async fn process(&self, candidates: Vec<Monitor>, now: DateTime<Utc>) -> Vec<MonitorReport> {
        let mut slots: Vec<Option<MonitorOutcome>> = vec![None; candidates.len()];
        let mut tasks = Vec::new();
        let mut admitted = 0usize;

        for (index, monitor) in candidates.iter().enumerate() {
            if let Some(next) = monitor.next_due_at(now) {
                slots[index] = Some(MonitorOutcome::Skipped {
                    reason: SkipReason::NotDue,
                    due_in_secs: Some(next.signed_duration_since(now).num_seconds()),
                });
                continue;
            }
            if admitted >= self.config.max_monitors_per_tick {
                slots[index] = Some(skipped(SkipReason::BatchLimit));
                continue;
            }
            if !self.in_flight.insert(monitor.id.clone()) {
                slots[index] = Some(skipped(SkipReason::InFlight));
                continue;
            }
            admitted += 1;

            let guard = InFlight {
                set: self.in_flight.clone(),
                id: monitor.id.clone(),
            };
            let permits = self.permits.clone();
            let executor = self.executor.clone();
            let evaluator = self.evaluator.clone();
            let monitor = monitor.clone();
            let span = check_span!(monitor.id, monitor.url);
            let handle = tokio::spawn(
                async move {
                    let _guard = guard;
                    let _permit = permits.acquire_owned().await;
                    check_one(&executor, &evaluator, &monitor).await
                }
                .instrument(span),
            );
            tasks.push((index, handle));
        }

        for (index, handle) in tasks {
            let outcome = match handle.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    tracing::warn!(monitor_id = %candidates[index].id, error = %e, "check failed");
                    MonitorOutcome::Failed { error: e.to_string() }
                }
                Err(join_error) => {
                    tracing::error!(monitor_id = %candidates[index].id, error = %join_error, "check task aborted");
                    MonitorOutcome::Failed {
                        error: format!("check task aborted: {join_error}"),
                    }
                }
            };
            slots[index] = Some(outcome);
        }

        candidates
            .into_iter()
            .zip(slots)
            .map(|(monitor, outcome)| MonitorReport {
                id: monitor.id,
                url: monitor.url,
                outcome: outcome.unwrap_or(MonitorOutcome::Failed {
                    error: "no outcome recorded".to_string(),
                }),
            })
            .collect()
    }

    fn record_metrics(&self, report: &TickReport, duration_ms: u64) {
        let Ok(mut metrics) = self.metrics.lock() else {
            return;
        };
        for result in &report.results {
            if let MonitorOutcome::Checked {
                classification,
                http_status,
                response_time_ms,
                ..
            } = &result.outcome
            {
                metrics.checks.record(
                    *classification == CheckClassification::Up,
                    *http_status,
                    *response_time_ms,
                );
            }
        }
        metrics
            .ticks
            .record(report.timestamp, report.checked, report.skipped, report.failed, duration_ms);
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

fn skipped(reason: SkipReason) -> MonitorOutcome {
    MonitorOutcome::Skipped {
        reason,
        due_in_secs: None,
    }
}

/// Probe, persist, then apply the result to the monitor's state.
async fn check_one(
    executor: &CheckExecutor,
    evaluator: &StatusEvaluator,
    monitor: &Monitor,
) -> BeaconResult<MonitorOutcome> {
    let result = executor.execute(monitor).await?;
    let applied = evaluator.apply(&result).await?;
    Ok(MonitorOutcome::Checked {
        classification: result.classification(),
        http_status: result.http_status,
        response_time_ms: result.response_time_ms,
        error: result.error_message,
        signal: applied.signal,
        incident_error: applied.incident_error,
    })
}
