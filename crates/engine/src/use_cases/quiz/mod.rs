//! Quiz use cases.
//!
//! - `engine` - synchronous session orchestration with timers behind a port
//! - `runtime` - the engine on its own task, driven by commands
//! - `render` - session state to render snapshot

mod engine;
mod render;
mod runtime;

pub use engine::QuizEngine;
pub use render::{build_snapshot, phase_data};
pub use runtime::{QuizCommand, QuizHandle, QuizRuntime, RuntimeError};
