//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! session state was modified. The engine maps them to timer scheduling,
//! logging and render snapshots.

pub mod session_events;

pub use session_events::*;
