//! Tokio-backed timer scheduling.
//!
//! Each scheduled transition is a spawned task that sleeps and then hands the
//! token to the configured sink. Cancelling aborts the task; a token that
//! slips through after cancellation is rejected by the session as stale.

use std::sync::Arc;
use std::time::Duration;

use rolodex_domain::TransitionToken;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{SchedulerPort, TimerHandle};

/// Receives tokens whose delay has elapsed.
pub type TimerSink = Arc<dyn Fn(TransitionToken) + Send + Sync>;

/// Scheduler that spawns one tokio task per pending transition.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    sink: TimerSink,
}

impl TokioScheduler {
    pub fn new(sink: impl Fn(TransitionToken) + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}

impl SchedulerPort for TokioScheduler {
    fn schedule(&self, delay: Duration, token: TransitionToken) -> Box<dyn TimerHandle> {
        let sink = Arc::clone(&self.sink);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!(token = %token, "Timer elapsed");
            sink(token);
        });
        Box::new(TokioTimerHandle { task })
    }
}

/// Handle over the sleeping task.
pub struct TokioTimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        // abort() is a no-op on finished tasks
        self.task.abort();
    }
}
