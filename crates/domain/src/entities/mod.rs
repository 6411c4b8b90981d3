//! Domain entities - Core business objects with identity

mod contact;

pub use contact::{Contact, ContactCategory};
