//! API layer - host entry points.

pub mod terminal;

pub use terminal::{render_snapshot, ParseCommandError, TerminalCommand, HELP};
