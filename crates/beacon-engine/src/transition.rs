//! Per-monitor lifecycle state machine.
//!
//! Pure: folds one `CheckResult` into the previous run state and reports the
//! edge-triggered signal, if any. No I/O.

use beacon_core::models::{CheckResult, LifecycleState, MonitorRunState, MonitorSignal};

/// Next run state plus the signal raised by the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: MonitorRunState,
    pub signal: Option<MonitorSignal>,
}

/// Fold `result` into `prev`.
///
/// - success: failures reset to 0; `down` becomes `up` with a recovery signal,
///   anything else but `paused` becomes `up`.
/// - failure: failures grow by one; reaching `alert_after` from any state but
///   `down` moves to `down` with a degradation signal.
/// - `paused` only absorbs counters.
pub fn evaluate(prev: &MonitorRunState, alert_after: u32, result: &CheckResult) -> Transition {
    let mut state = MonitorRunState {
        last_checked_at: Some(result.timestamp),
        last_response_status: result.http_status,
        consecutive_failures: prev.consecutive_failures,
        lifecycle: prev.lifecycle,
    };
    let mut signal = None;

    if result.success {
        state.consecutive_failures = 0;
        match prev.lifecycle {
            LifecycleState::Paused => {}
            LifecycleState::Down => {
                state.lifecycle = LifecycleState::Up;
                signal = Some(MonitorSignal::Recovery);
            }
            LifecycleState::Unknown | LifecycleState::Up => state.lifecycle = LifecycleState::Up,
        }
    } else {
        state.consecutive_failures = prev.consecutive_failures.saturating_add(1);
        let crossed = state.consecutive_failures >= alert_after.max(1);
        match prev.lifecycle {
            LifecycleState::Paused | LifecycleState::Down => {}
            LifecycleState::Unknown | LifecycleState::Up if crossed => {
                state.lifecycle = LifecycleState::Down;
                signal = Some(MonitorSignal::Degradation);
            }
            LifecycleState::Unknown | LifecycleState::Up => {}
        }
    }

    Transition { state, signal }
}
