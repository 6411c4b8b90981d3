//! Rolodex Domain - the quiz session core.
//!
//! Pure, synchronous and free of I/O. Randomness comes in through closures
//! and delayed transitions go out as `PendingTransition` values, so the
//! engine decides how to draw numbers and how to wait.

pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod quiz;
pub mod value_objects;

pub use entities::{Contact, ContactCategory};
pub use error::DomainError;
pub use events::{IgnoredReason, SessionUpdate};
pub use ids::{ContactId, QuizSessionId};
pub use quiz::{
    compute_eligible_pool, evaluate, generate_round, AnswerEvaluation, EligiblePool,
    PendingTransition, Round, SessionPhase, SessionState, TransitionKind, TransitionToken,
    MIN_POOL_SIZE, OPTIONS_PER_ROUND,
};
pub use value_objects::{DisplayName, FilterSelection, Hint, PhotoRef, SessionSettings, Tag};
