//! Quiz engine: owns the session, the latest inputs and the one live timer.
//!
//! Every input is applied synchronously to [`SessionState`]; the resulting
//! [`SessionUpdate`] tells the engine which timer to cancel and which to
//! schedule. The engine never waits itself. Timer firings come back in
//! through [`QuizEngine::timer_fired`].

use std::sync::Arc;

use rolodex_domain::{
    Contact, ContactId, EligiblePool, FilterSelection, SessionSettings, SessionState,
    SessionUpdate, TransitionToken,
};
use rolodex_shared::{QuizSnapshot, SessionSummary};

use super::render::build_snapshot;
use crate::infrastructure::ports::{ClockPort, RandomPort, SchedulerPort, TimerHandle};

struct ActiveTimer {
    token: TransitionToken,
    handle: Box<dyn TimerHandle>,
}

pub struct QuizEngine {
    session: SessionState,
    contacts: Vec<Contact>,
    filter: FilterSelection,
    pool: EligiblePool,
    scheduler: Arc<dyn SchedulerPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    timer: Option<ActiveTimer>,
    summary: Option<SessionSummary>,
}

impl QuizEngine {
    /// Create an idle engine with no contacts and no filter.
    pub fn new(
        settings: SessionSettings,
        scheduler: Arc<dyn SchedulerPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            session: SessionState::new(settings),
            contacts: Vec::new(),
            filter: FilterSelection::empty(),
            pool: EligiblePool::default(),
            scheduler,
            random,
            clock,
            timer: None,
            summary: None,
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the contact list (e.g. after a refetch).
    pub fn set_contacts(&mut self, contacts: Vec<Contact>) -> SessionUpdate {
        self.contacts = contacts;
        self.recompute_pool()
    }

    /// Replace the filter selection.
    pub fn set_filter(&mut self, filter: FilterSelection) -> SessionUpdate {
        self.filter = filter;
        self.recompute_pool()
    }

    pub fn submit(&mut self, answer: ContactId) -> SessionUpdate {
        let update = self.session.submit(answer);
        self.apply(update)
    }

    /// Deliver an elapsed timer.
    pub fn timer_fired(&mut self, token: TransitionToken) -> SessionUpdate {
        if self.timer.as_ref().is_some_and(|t| t.token == token) {
            self.timer = None;
        }
        let random = Arc::clone(&self.random);
        let mut gen_range = |min: usize, max: usize| random.gen_range(min, max);
        let update = self.session.fire(token, &self.pool, &mut gen_range);
        self.apply(update)
    }

    pub fn replay(&mut self) -> SessionUpdate {
        let random = Arc::clone(&self.random);
        let mut gen_range = |min: usize, max: usize| random.gen_range(min, max);
        let update = self.session.replay(&self.pool, &mut gen_range);
        self.apply(update)
    }

    /// Release the session and cancel whatever timer is still live.
    pub fn teardown(&mut self) -> SessionUpdate {
        let update = self.session.teardown();
        let update = self.apply(update);
        if let Some(timer) = self.timer.take() {
            timer.handle.cancel();
        }
        update
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    pub fn snapshot(&self) -> QuizSnapshot {
        build_snapshot(&self.session, &self.pool)
    }

    /// Summary of the most recently completed session, handed out once.
    pub fn take_summary(&mut self) -> Option<SessionSummary> {
        self.summary.take()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn pool(&self) -> &EligiblePool {
        &self.pool
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn recompute_pool(&mut self) -> SessionUpdate {
        self.pool = EligiblePool::compute(&self.contacts, &self.filter);
        tracing::debug!(
            pool_size = self.pool.len(),
            contacts = self.contacts.len(),
            filter_active = self.filter.is_active(),
            "Eligible pool recomputed"
        );

        let random = Arc::clone(&self.random);
        let mut gen_range = |min: usize, max: usize| random.gen_range(min, max);
        let update = self.session.sync_pool(&self.pool, &mut gen_range);
        self.apply(update)
    }

    fn apply(&mut self, update: SessionUpdate) -> SessionUpdate {
        if let Some(token) = update.cancelled() {
            self.cancel_timer(token);
        }

        if let Some(pending) = update.scheduled() {
            if let Some(stale) = self.timer.take() {
                stale.handle.cancel();
            }
            let handle = self.scheduler.schedule(pending.delay, pending.token);
            self.timer = Some(ActiveTimer {
                token: pending.token,
                handle,
            });
        }

        self.log(&update);

        if let SessionUpdate::Completed {
            session_id,
            score,
            total_rounds,
        } = &update
        {
            self.summary = Some(SessionSummary {
                session_id: session_id.to_uuid(),
                score: *score,
                total_rounds: *total_rounds,
                completed_at: self.clock.now(),
            });
        }

        update
    }

    fn cancel_timer(&mut self, token: TransitionToken) {
        if self.timer.as_ref().is_some_and(|t| t.token == token) {
            if let Some(timer) = self.timer.take() {
                timer.handle.cancel();
            }
        }
    }

    fn log(&self, update: &SessionUpdate) {
        match update {
            SessionUpdate::Started {
                session_id,
                total_rounds,
                ..
            } => {
                tracing::info!(session_id = %session_id, total_rounds, "Quiz session started")
            }
            SessionUpdate::Completed {
                session_id,
                score,
                total_rounds,
            } => {
                tracing::info!(session_id = %session_id, score, total_rounds, "Quiz session complete")
            }
            SessionUpdate::PoolExhausted { pool_size } => {
                tracing::warn!(pool_size, "Pool too small to continue, session ended")
            }
            SessionUpdate::SubmissionIgnored { reason } => {
                tracing::debug!(?reason, "Submission ignored")
            }
            SessionUpdate::StaleTransition { token } => {
                tracing::debug!(token = %token, "Stale timer ignored")
            }
            SessionUpdate::ReplayIgnored { reason } => {
                tracing::debug!(?reason, "Replay ignored")
            }
            other => tracing::trace!(update = ?other, phase = %self.session.phase(), "Session updated"),
        }
    }
}

impl Drop for QuizEngine {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.cancel();
        }
    }
}
