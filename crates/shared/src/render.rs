//! Render model published on every quiz transition
//!
//! A `QuizSnapshot` is everything a host needs to draw the quiz screen:
//! the prompt, the ordered options with their enabled state and feedback,
//! the phase, and progress.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire form of the session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhaseData {
    /// No filter selected or not enough eligible contacts
    Idle,
    Loading,
    AwaitingAnswer,
    FeedbackCorrect,
    FeedbackIncorrect,
    Complete,
    /// Unknown phase for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Feedback state of a single option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionFeedback {
    /// The option is the answer that was just accepted as correct
    Correct,
    /// The option is the answer that was just rejected
    Incorrect,
}

/// What the player is asked to recognise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub contact_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One answer button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub contact_id: Uuid,
    pub display_name: String,
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<OptionFeedback>,
}

/// Full render model for the quiz screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
    pub phase: QuizPhaseData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptView>,
    #[serde(default)]
    pub options: Vec<OptionView>,
    pub score: u32,
    /// Zero-based index of the current round
    pub round_index: u32,
    pub total_rounds: u32,
    /// Number of eligible contacts under the current filter
    pub pool_size: usize,
    /// Contacts needed before a session can start
    pub min_pool_size: usize,
}

impl QuizSnapshot {
    /// Snapshot of a session that has nothing to show yet.
    pub fn idle(total_rounds: u32, pool_size: usize, min_pool_size: usize) -> Self {
        Self {
            phase: QuizPhaseData::Idle,
            prompt: None,
            options: Vec::new(),
            score: 0,
            round_index: 0,
            total_rounds,
            pool_size,
            min_pool_size,
        }
    }

    /// Whether the host should show the "not enough people to quiz yet" state.
    pub fn is_empty_state(&self) -> bool {
        self.phase == QuizPhaseData::Idle
    }

    /// One-based round number for display.
    pub fn round_number(&self) -> u32 {
        self.round_index + 1
    }
}
