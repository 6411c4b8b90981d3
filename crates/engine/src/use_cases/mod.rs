//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area.

pub mod inputs;
pub mod quiz;

pub use inputs::{InputError, InputUseCases};
pub use quiz::{QuizEngine, QuizHandle, QuizRuntime};
