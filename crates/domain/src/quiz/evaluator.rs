//! Answer evaluation - pure comparison against the round's correct option

use crate::quiz::round::Round;
use crate::quiz::session::SessionPhase;
use crate::ContactId;

/// Result of comparing a selected option to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEvaluation {
    pub correct: bool,
    pub selected: ContactId,
}

impl AnswerEvaluation {
    /// Feedback phase the session enters for this answer.
    pub fn next_phase(&self) -> SessionPhase {
        if self.correct {
            SessionPhase::FeedbackCorrect
        } else {
            SessionPhase::FeedbackIncorrect
        }
    }
}

/// Evaluate a selected contact against a round. Never mutates anything.
pub fn evaluate(round: &Round, selected: ContactId) -> AnswerEvaluation {
    AnswerEvaluation {
        correct: selected == round.option_ids()[round.correct_index()],
        selected,
    }
}
