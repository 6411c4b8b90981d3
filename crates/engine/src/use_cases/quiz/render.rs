//! Domain session -> render snapshot.

use rolodex_domain::{EligiblePool, SessionPhase, SessionState, MIN_POOL_SIZE};
use rolodex_shared::{OptionFeedback, OptionView, PromptView, QuizPhaseData, QuizSnapshot};

pub fn phase_data(phase: SessionPhase) -> QuizPhaseData {
    match phase {
        SessionPhase::Idle => QuizPhaseData::Idle,
        SessionPhase::Loading => QuizPhaseData::Loading,
        SessionPhase::AwaitingAnswer => QuizPhaseData::AwaitingAnswer,
        SessionPhase::FeedbackCorrect => QuizPhaseData::FeedbackCorrect,
        SessionPhase::FeedbackIncorrect => QuizPhaseData::FeedbackIncorrect,
        SessionPhase::Complete => QuizPhaseData::Complete,
    }
}

/// Build the snapshot a host renders from.
///
/// Options are disabled whenever the session is not accepting answers. During
/// feedback the submitted option carries the verdict.
pub fn build_snapshot(session: &SessionState, pool: &EligiblePool) -> QuizSnapshot {
    let phase = session.phase();
    let feedback = match phase {
        SessionPhase::FeedbackCorrect => Some(OptionFeedback::Correct),
        SessionPhase::FeedbackIncorrect => Some(OptionFeedback::Incorrect),
        _ => None,
    };
    let disabled = !phase.accepts_answers();

    let prompt = session.prompt_contact().map(|contact| PromptView {
        contact_id: contact.id().to_uuid(),
        photo_ref: contact.photo_ref().map(|p| p.as_str().to_string()),
        hint: contact.hint().map(|h| h.as_str().to_string()),
    });

    let options = session
        .cast()
        .iter()
        .map(|contact| OptionView {
            contact_id: contact.id().to_uuid(),
            display_name: contact.display_name().as_str().to_string(),
            disabled,
            feedback: feedback.filter(|_| session.last_answer() == Some(contact.id())),
        })
        .collect();

    QuizSnapshot {
        phase: phase_data(phase),
        prompt,
        options,
        score: session.score(),
        round_index: session.round_index(),
        total_rounds: session.total_rounds(),
        pool_size: pool.len(),
        min_pool_size: MIN_POOL_SIZE,
    }
}
