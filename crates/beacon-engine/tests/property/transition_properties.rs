//! Counter and edge-trigger properties of the lifecycle state machine.

use chrono::Utc;
use proptest::prelude::*;

use beacon_core::ids::MonitorId;
use beacon_core::models::{CheckResult, LifecycleState, MonitorRunState, MonitorSignal};
use beacon_engine::evaluate;

fn check(success: bool) -> CheckResult {
    CheckResult {
        monitor_id: MonitorId::from("m"),
        timestamp: Utc::now(),
        http_status: Some(if success { 204 } else { 500 }),
        response_time_ms: 1,
        success,
        error_message: None,
    }
}

fn run(alert_after: u32, outcomes: &[bool]) -> (MonitorRunState, Vec<Option<MonitorSignal>>) {
    let mut state = MonitorRunState::default();
    let mut signals = Vec::with_capacity(outcomes.len());
    for &ok in outcomes {
        let t = evaluate(&state, alert_after, &check(ok));
        state = t.state;
        signals.push(t.signal);
    }
    (state, signals)
}

proptest! {
    #[test]
    fn failures_reset_on_success_and_grow_by_one(
        alert_after in 1u32..6,
        outcomes in prop::collection::vec(any::<bool>(), 1..60),
    ) {
        let mut state = MonitorRunState::default();
        for ok in outcomes {
            let before = state.consecutive_failures;
            state = evaluate(&state, alert_after, &check(ok)).state;
            if ok {
                prop_assert_eq!(state.consecutive_failures, 0);
            } else {
                prop_assert_eq!(state.consecutive_failures, before + 1);
            }
        }
    }

    #[test]
    fn one_degradation_per_run_reaching_threshold(
        alert_after in 1u32..6,
        outcomes in prop::collection::vec(any::<bool>(), 1..80),
    ) {
        let (_, signals) = run(alert_after, &outcomes);

        let expected_degradations = outcomes
            .split(|ok| *ok)
            .filter(|run| run.len() as u32 >= alert_after)
            .count();
        let degradations = signals
            .iter()
            .filter(|s| **s == Some(MonitorSignal::Degradation))
            .count();
        prop_assert_eq!(degradations, expected_degradations);
    }

    #[test]
    fn signals_alternate(
        alert_after in 1u32..4,
        outcomes in prop::collection::vec(any::<bool>(), 1..80),
    ) {
        let (_, signals) = run(alert_after, &outcomes);
        let raised: Vec<MonitorSignal> = signals.into_iter().flatten().collect();
        for pair in raised.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
        if let Some(first) = raised.first() {
            prop_assert_eq!(*first, MonitorSignal::Degradation);
        }
    }

    #[test]
    fn paused_never_signals(
        alert_after in 1u32..4,
        outcomes in prop::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut state = MonitorRunState {
            lifecycle: LifecycleState::Paused,
            ..Default::default()
        };
        for ok in outcomes {
            let t = evaluate(&state, alert_after, &check(ok));
            prop_assert_eq!(t.signal, None);
            prop_assert_eq!(t.state.lifecycle, LifecycleState::Paused);
            state = t.state;
        }
    }
}

#[test]
fn fixture_scenarios() {
    let scenarios = test_fixtures::load_scenarios();
    assert!(!scenarios.is_empty());
    for scenario in scenarios {
        assert_eq!(scenario.checks.len(), scenario.signals.len(), "{}", scenario.name);
        let (state, signals) = run(scenario.alert_after, &scenario.checks);
        assert_eq!(signals, scenario.signals, "{}", scenario.name);
        assert_eq!(state.lifecycle, scenario.final_lifecycle, "{}", scenario.name);
        assert_eq!(state.consecutive_failures, scenario.final_failures, "{}", scenario.name);
    }
}
