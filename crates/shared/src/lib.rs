//! Rolodex Shared - types exchanged between the quiz engine and its hosts
//!
//! - Render model (`QuizSnapshot` and its parts)
//! - Session-complete event (`SessionSummary`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod render;
pub mod summary;

pub use render::{OptionFeedback, OptionView, PromptView, QuizPhaseData, QuizSnapshot};
pub use summary::SessionSummary;
