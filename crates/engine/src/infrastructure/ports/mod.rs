//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Contact and filter collaborators (could swap JSON files -> HTTP API / device storage)
//! - Timers (tokio in production, a manual scheduler in tests)
//! - Clock/Random (for testing)

mod error;
mod scheduler;
mod sources;
mod testing;

// =============================================================================
// Collaborator Ports
// =============================================================================
pub use sources::{ContactSource, FilterStore};

// =============================================================================
// Timer Ports
// =============================================================================
pub use scheduler::{SchedulerPort, TimerHandle};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use scheduler::{MockSchedulerPort, MockTimerHandle};

#[cfg(test)]
pub use sources::{MockContactSource, MockFilterStore};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::SourceError;
