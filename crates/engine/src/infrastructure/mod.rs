//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod contact_source;
pub mod filter_store;
pub mod ports;
pub mod scheduler;
