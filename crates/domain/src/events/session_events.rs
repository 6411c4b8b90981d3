//! Quiz session mutation outcomes.

use crate::quiz::{PendingTransition, SessionPhase, TransitionToken};
use crate::{ContactId, QuizSessionId};

/// Why an input was dropped without changing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The session is not in a phase that accepts this input
    WrongPhase(SessionPhase),
    /// The selected contact is not one of the current round's options
    UnknownOption,
    /// The session has been torn down
    TornDown,
}

/// Outcome of a session mutation.
///
/// Variants that start a timed transition carry the `PendingTransition` to
/// schedule; variants that supersede one carry the token to cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The pool cannot fill a round; the session is idle.
    WaitingForPool { pool_size: usize },
    /// A new session began with its first round (Loading -> AwaitingAnswer).
    Started {
        session_id: QuizSessionId,
        total_rounds: u32,
        prompt: ContactId,
        cancelled: Option<TransitionToken>,
    },
    AnsweredCorrectly {
        score: u32,
        round_index: u32,
        scheduled: PendingTransition,
        cancelled: Option<TransitionToken>,
    },
    AnsweredIncorrectly {
        round_index: u32,
        scheduled: PendingTransition,
        cancelled: Option<TransitionToken>,
    },
    SubmissionIgnored { reason: IgnoredReason },
    /// Auto-advance produced the next round.
    Advanced { round_index: u32, prompt: ContactId },
    /// Incorrect feedback cleared; the same round is awaiting an answer again.
    FeedbackCleared { round_index: u32 },
    Completed {
        session_id: QuizSessionId,
        score: u32,
        total_rounds: u32,
    },
    /// Auto-advance found the pool undersized and ended the session.
    PoolExhausted { pool_size: usize },
    /// A timer fired for a transition that is no longer pending.
    StaleTransition { token: TransitionToken },
    ReplayIgnored { reason: IgnoredReason },
    /// The input did not affect the session (e.g. pool change mid-round).
    Unchanged { phase: SessionPhase },
    TornDown { cancelled: Option<TransitionToken> },
}

impl SessionUpdate {
    /// Transition the host must schedule, if any.
    pub fn scheduled(&self) -> Option<&PendingTransition> {
        match self {
            Self::AnsweredCorrectly { scheduled, .. } | Self::AnsweredIncorrectly { scheduled, .. } => {
                Some(scheduled)
            }
            _ => None,
        }
    }

    /// Previously pending transition the host must cancel, if any.
    pub fn cancelled(&self) -> Option<TransitionToken> {
        match self {
            Self::Started { cancelled, .. }
            | Self::AnsweredCorrectly { cancelled, .. }
            | Self::AnsweredIncorrectly { cancelled, .. }
            | Self::TornDown { cancelled } => *cancelled,
            _ => None,
        }
    }

    /// Whether the session changed in a way a renderer cares about.
    pub fn is_visible_change(&self) -> bool {
        !matches!(
            self,
            Self::SubmissionIgnored { .. }
                | Self::StaleTransition { .. }
                | Self::ReplayIgnored { .. }
                | Self::Unchanged { .. }
        )
    }
}
