//! Rolodex Engine library.
//!
//! Runs quiz sessions over a contact list.
//!
//! ## Structure
//!
//! - `use_cases/` - the quiz engine, its runtime and the input flows feeding it
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - Host entry points (terminal)
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
