//! Contact and filter collaborator ports.
//!
//! The quiz engine never performs I/O itself. Hosts fetch through these ports
//! and push the results into the runtime.

use async_trait::async_trait;
use rolodex_domain::{Contact, FilterSelection};

use super::error::SourceError;

/// Supplies the current contact list (e.g. after a refetch).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSource: Send + Sync {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, SourceError>;
}

/// Persists the user's category/tag filter selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterStore: Send + Sync {
    /// Load the saved selection. A store with nothing saved returns an empty selection.
    async fn load(&self) -> Result<FilterSelection, SourceError>;
    async fn save(&self, selection: &FilterSelection) -> Result<(), SourceError>;
}
