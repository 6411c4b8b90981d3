//! Quiz session aggregate - the state machine of record
//!
//! | Phase | Input | Next |
//! |-------|-------|------|
//! | Idle | pool becomes playable | Loading -> AwaitingAnswer |
//! | AwaitingAnswer | submit | FeedbackCorrect / FeedbackIncorrect |
//! | FeedbackCorrect | advance fires | AwaitingAnswer (next round) / Complete / Idle (pool exhausted) |
//! | FeedbackIncorrect | clear fires | AwaitingAnswer (same round) |
//! | Complete | replay | Loading -> AwaitingAnswer / Idle |
//!
//! The aggregate never sleeps. Mutations that need a delayed follow-up return
//! a [`PendingTransition`]; the host schedules it and calls [`SessionState::fire`]
//! with the token when the delay elapses. Only the most recent token is
//! honoured, so late or duplicate firings are harmless.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Contact;
use crate::events::{IgnoredReason, SessionUpdate};
use crate::quiz::evaluator::evaluate;
use crate::quiz::pool::EligiblePool;
use crate::quiz::round::{generate_round, Round};
use crate::value_objects::SessionSettings;
use crate::{ContactId, QuizSessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Idle,
    Loading,
    AwaitingAnswer,
    FeedbackCorrect,
    FeedbackIncorrect,
    Complete,
}

impl SessionPhase {
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::AwaitingAnswer)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::AwaitingAnswer => "awaiting_answer",
            Self::FeedbackCorrect => "feedback_correct",
            Self::FeedbackIncorrect => "feedback_incorrect",
            Self::Complete => "complete",
        };
        write!(f, "{}", s)
    }
}

/// Identifies one scheduled transition. Tokens increase monotonically per session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionToken(u64);

impl TransitionToken {
    /// Wrap a raw token value. A token not issued by the session is simply stale.
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// After a correct answer: next round or completion
    Advance,
    /// After an incorrect answer: back to the same round
    ClearFeedback,
}

/// A delayed transition the host must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub token: TransitionToken,
    pub kind: TransitionKind,
    pub delay: Duration,
}

/// Session state owned exclusively by the state machine.
///
/// # Invariants
///
/// - `round` is `Some` exactly in `AwaitingAnswer`, `FeedbackCorrect` and `FeedbackIncorrect`
/// - at most one transition is pending, and only in a feedback phase
/// - `score <= round_index + 1 <= total_rounds`
/// - `total_rounds` never changes during a session
#[derive(Debug, Clone)]
pub struct SessionState {
    id: QuizSessionId,
    settings: SessionSettings,
    phase: SessionPhase,
    round_index: u32,
    score: u32,
    round: Option<Round>,
    /// Option contacts of the current round, in display order
    cast: Vec<Contact>,
    last_answer: Option<ContactId>,
    last_prompt: Option<ContactId>,
    pending: Option<PendingTransition>,
    next_token: u64,
    torn_down: bool,
}

impl SessionState {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            id: QuizSessionId::new(),
            settings,
            phase: SessionPhase::Idle,
            round_index: 0,
            score: 0,
            round: None,
            cast: Vec::new(),
            last_answer: None,
            last_prompt: None,
            pending: None,
            next_token: 0,
            torn_down: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> QuizSessionId {
        self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn total_rounds(&self) -> u32 {
        self.settings.total_rounds()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn cast(&self) -> &[Contact] {
        &self.cast
    }

    /// Contact of the current prompt, from the round snapshot.
    pub fn prompt_contact(&self) -> Option<&Contact> {
        let round = self.round.as_ref()?;
        self.cast.get(round.correct_index())
    }

    /// The answer being shown as feedback, if in a feedback phase.
    pub fn last_answer(&self) -> Option<ContactId> {
        self.last_answer
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// React to a recomputed pool.
    ///
    /// Only an idle session reacts: it starts once the pool is playable. A
    /// round in flight is never interrupted; the new pool only matters for the
    /// next round generation.
    pub fn sync_pool<R>(&mut self, pool: &EligiblePool, gen_range: &mut R) -> SessionUpdate
    where
        R: FnMut(usize, usize) -> usize,
    {
        if self.torn_down {
            return SessionUpdate::Unchanged { phase: self.phase };
        }
        match self.phase {
            SessionPhase::Idle if pool.is_playable() => self.start(pool, gen_range),
            SessionPhase::Idle => SessionUpdate::WaitingForPool {
                pool_size: pool.len(),
            },
            phase => SessionUpdate::Unchanged { phase },
        }
    }

    /// Submit an answer. Accepted only while awaiting an answer, which makes
    /// double taps and taps racing a feedback timer no-ops.
    pub fn submit(&mut self, answer: ContactId) -> SessionUpdate {
        if self.torn_down {
            return SessionUpdate::SubmissionIgnored {
                reason: IgnoredReason::TornDown,
            };
        }
        if !self.phase.accepts_answers() {
            return SessionUpdate::SubmissionIgnored {
                reason: IgnoredReason::WrongPhase(self.phase),
            };
        }
        let Some(round) = self.round.as_ref() else {
            return SessionUpdate::SubmissionIgnored {
                reason: IgnoredReason::WrongPhase(self.phase),
            };
        };
        if !round.contains(answer) {
            return SessionUpdate::SubmissionIgnored {
                reason: IgnoredReason::UnknownOption,
            };
        }

        let evaluation = evaluate(round, answer);
        let cancelled = self.pending.take().map(|p| p.token);
        self.last_answer = Some(answer);
        self.phase = evaluation.next_phase();

        if evaluation.correct {
            self.score += 1;
            let scheduled = self.schedule(TransitionKind::Advance);
            SessionUpdate::AnsweredCorrectly {
                score: self.score,
                round_index: self.round_index,
                scheduled,
                cancelled,
            }
        } else {
            let scheduled = self.schedule(TransitionKind::ClearFeedback);
            SessionUpdate::AnsweredIncorrectly {
                round_index: self.round_index,
                scheduled,
                cancelled,
            }
        }
    }

    /// Apply a scheduled transition whose delay has elapsed.
    ///
    /// Tokens that are not the pending one (cancelled, already fired, or from
    /// before a replay) are ignored.
    pub fn fire<R>(
        &mut self,
        token: TransitionToken,
        pool: &EligiblePool,
        gen_range: &mut R,
    ) -> SessionUpdate
    where
        R: FnMut(usize, usize) -> usize,
    {
        if self.torn_down {
            return SessionUpdate::StaleTransition { token };
        }
        let pending = match self.pending {
            Some(p) if p.token == token => p,
            _ => return SessionUpdate::StaleTransition { token },
        };
        self.pending = None;
        self.last_answer = None;

        match pending.kind {
            TransitionKind::ClearFeedback => {
                self.phase = SessionPhase::AwaitingAnswer;
                SessionUpdate::FeedbackCleared {
                    round_index: self.round_index,
                }
            }
            TransitionKind::Advance => {
                if self.round_index + 1 >= self.total_rounds() {
                    self.phase = SessionPhase::Complete;
                    self.clear_round();
                    return SessionUpdate::Completed {
                        session_id: self.id,
                        score: self.score,
                        total_rounds: self.total_rounds(),
                    };
                }
                if !pool.is_playable() {
                    return self.exhaust(pool);
                }
                match generate_round(pool, self.last_prompt, gen_range) {
                    Ok(round) => {
                        self.round_index += 1;
                        let prompt = self.install_round(round, pool);
                        self.phase = SessionPhase::AwaitingAnswer;
                        SessionUpdate::Advanced {
                            round_index: self.round_index,
                            prompt,
                        }
                    }
                    Err(_) => self.exhaust(pool),
                }
            }
        }
    }

    /// Start a fresh session after completion.
    ///
    /// Resets score and round index and re-validates the pool: a playable
    /// pool goes straight to the first round, otherwise the session idles.
    pub fn replay<R>(&mut self, pool: &EligiblePool, gen_range: &mut R) -> SessionUpdate
    where
        R: FnMut(usize, usize) -> usize,
    {
        if self.torn_down {
            return SessionUpdate::ReplayIgnored {
                reason: IgnoredReason::TornDown,
            };
        }
        if self.phase != SessionPhase::Complete {
            return SessionUpdate::ReplayIgnored {
                reason: IgnoredReason::WrongPhase(self.phase),
            };
        }
        if pool.is_playable() {
            self.start(pool, gen_range)
        } else {
            self.reset(SessionPhase::Idle);
            SessionUpdate::WaitingForPool {
                pool_size: pool.len(),
            }
        }
    }

    /// Release the session. Every later input is a no-op.
    pub fn teardown(&mut self) -> SessionUpdate {
        if self.torn_down {
            return SessionUpdate::TornDown { cancelled: None };
        }
        let cancelled = self.pending.take().map(|p| p.token);
        self.torn_down = true;
        self.reset(SessionPhase::Idle);
        SessionUpdate::TornDown { cancelled }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn start<R>(&mut self, pool: &EligiblePool, gen_range: &mut R) -> SessionUpdate
    where
        R: FnMut(usize, usize) -> usize,
    {
        let cancelled = self.pending.take().map(|p| p.token);
        self.id = QuizSessionId::new();
        self.reset(SessionPhase::Loading);

        match generate_round(pool, self.last_prompt, gen_range) {
            Ok(round) => {
                let prompt = self.install_round(round, pool);
                self.phase = SessionPhase::AwaitingAnswer;
                SessionUpdate::Started {
                    session_id: self.id,
                    total_rounds: self.total_rounds(),
                    prompt,
                    cancelled,
                }
            }
            Err(_) => {
                self.phase = SessionPhase::Idle;
                SessionUpdate::WaitingForPool {
                    pool_size: pool.len(),
                }
            }
        }
    }

    fn exhaust(&mut self, pool: &EligiblePool) -> SessionUpdate {
        self.reset(SessionPhase::Idle);
        SessionUpdate::PoolExhausted {
            pool_size: pool.len(),
        }
    }

    fn reset(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.round_index = 0;
        self.score = 0;
        self.last_answer = None;
        self.pending = None;
        self.clear_round();
    }

    fn clear_round(&mut self) {
        self.round = None;
        self.cast.clear();
    }

    fn install_round(&mut self, round: Round, pool: &EligiblePool) -> ContactId {
        let prompt = round.prompt_contact_id();
        self.cast = round
            .option_ids()
            .iter()
            .filter_map(|id| pool.get(*id).cloned())
            .collect();
        self.round = Some(round);
        self.last_prompt = Some(prompt);
        self.last_answer = None;
        prompt
    }

    fn schedule(&mut self, kind: TransitionKind) -> PendingTransition {
        self.next_token += 1;
        let delay = match kind {
            TransitionKind::Advance => self.settings.correct_advance(),
            TransitionKind::ClearFeedback => self.settings.incorrect_clear(),
        };
        let pending = PendingTransition {
            token: TransitionToken(self.next_token),
            kind,
            delay,
        };
        self.pending = Some(pending);
        pending
    }
}
