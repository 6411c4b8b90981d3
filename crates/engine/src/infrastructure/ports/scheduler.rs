//! Cancellable delayed-task port for timed session transitions.

use std::time::Duration;

use rolodex_domain::TransitionToken;

/// Handle to a scheduled transition.
#[cfg_attr(test, mockall::automock)]
pub trait TimerHandle: Send {
    /// Cancel the scheduled firing.
    ///
    /// Idempotent: calling it on an already fired or already cancelled
    /// handle does nothing.
    fn cancel(&self);
}

/// Schedules delivery of a transition token after a delay.
///
/// Where the token is delivered is up to the adapter; the quiz runtime wires
/// it back into its own command queue.
#[cfg_attr(test, mockall::automock)]
pub trait SchedulerPort: Send + Sync {
    fn schedule(&self, delay: Duration, token: TransitionToken) -> Box<dyn TimerHandle>;
}
