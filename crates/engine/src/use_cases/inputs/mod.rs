//! Input use cases.
//!
//! Move contacts and filter selections between their collaborators and the
//! quiz runtime. The runtime itself never performs I/O.

use std::sync::Arc;

use rolodex_domain::FilterSelection;

use crate::infrastructure::ports::{ContactSource, FilterStore, SourceError};
use crate::use_cases::quiz::{QuizHandle, RuntimeError};

/// Container for input use cases.
pub struct InputUseCases {
    pub refresh_contacts: Arc<RefreshContacts>,
    pub update_filter: Arc<UpdateFilter>,
    pub load_filter: Arc<LoadFilter>,
}

impl InputUseCases {
    pub fn new(
        refresh_contacts: Arc<RefreshContacts>,
        update_filter: Arc<UpdateFilter>,
        load_filter: Arc<LoadFilter>,
    ) -> Self {
        Self {
            refresh_contacts,
            update_filter,
            load_filter,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

// =============================================================================
// Contacts
// =============================================================================

/// Refetch the contact list and hand it to the quiz.
pub struct RefreshContacts {
    source: Arc<dyn ContactSource>,
    quiz: QuizHandle,
}

impl RefreshContacts {
    pub fn new(source: Arc<dyn ContactSource>, quiz: QuizHandle) -> Self {
        Self { source, quiz }
    }

    /// Returns the number of contacts fetched.
    pub async fn execute(&self) -> Result<usize, InputError> {
        let contacts = self.source.fetch_contacts().await?;
        let count = contacts.len();
        let quizzable = contacts.iter().filter(|c| c.is_quizzable()).count();
        tracing::info!(count, quizzable, "Contacts refreshed");
        self.quiz.set_contacts(contacts)?;
        Ok(count)
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Persist a new filter selection, then apply it.
///
/// Nothing is applied if saving fails, so the quiz never runs on a selection
/// the store does not have.
pub struct UpdateFilter {
    store: Arc<dyn FilterStore>,
    quiz: QuizHandle,
}

impl UpdateFilter {
    pub fn new(store: Arc<dyn FilterStore>, quiz: QuizHandle) -> Self {
        Self { store, quiz }
    }

    pub async fn execute(&self, selection: FilterSelection) -> Result<(), InputError> {
        self.store.save(&selection).await?;
        tracing::debug!(
            categories = selection.categories().len(),
            tags = selection.tags().len(),
            "Filter updated"
        );
        self.quiz.set_filter(selection)?;
        Ok(())
    }
}

/// Apply the saved filter selection (e.g. at startup).
pub struct LoadFilter {
    store: Arc<dyn FilterStore>,
    quiz: QuizHandle,
}

impl LoadFilter {
    pub fn new(store: Arc<dyn FilterStore>, quiz: QuizHandle) -> Self {
        Self { store, quiz }
    }

    pub async fn execute(&self) -> Result<FilterSelection, InputError> {
        let selection = self.store.load().await?;
        if !selection.is_active() {
            tracing::info!("No categories selected, quiz stays idle");
        }
        self.quiz.set_filter(selection.clone())?;
        Ok(selection)
    }
}
