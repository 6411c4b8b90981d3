//! Value objects - Immutable objects defined by their attributes

mod filter;
mod names;
mod settings;

pub use filter::FilterSelection;
pub use names::{DisplayName, Hint, PhotoRef, Tag};
pub use settings::{
    SessionSettings, DEFAULT_CORRECT_ADVANCE, DEFAULT_INCORRECT_CLEAR, DEFAULT_TOTAL_ROUNDS,
};
