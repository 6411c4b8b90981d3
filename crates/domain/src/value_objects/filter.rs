//! Category/tag filter selection driving the eligible pool

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Contact, ContactCategory};
use crate::value_objects::Tag;

/// The user's current filter selection.
///
/// An empty `categories` set means "no filter active": no session can run.
/// It is never interpreted as "all categories".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    categories: BTreeSet<ContactCategory>,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

impl FilterSelection {
    pub fn new(
        categories: impl IntoIterator<Item = ContactCategory>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }

    /// A selection with no categories (the idle state).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &BTreeSet<ContactCategory> {
        &self.categories
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Whether any category is selected.
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Category membership plus, when a tag filter is set, at least one shared tag.
    ///
    /// Eligibility (photo or hint) is checked separately by the pool.
    pub fn matches(&self, contact: &Contact) -> bool {
        if !self.categories.contains(&contact.category()) {
            return false;
        }
        self.tags.is_empty() || !self.tags.is_disjoint(contact.tags())
    }

    pub fn toggle_category(&mut self, category: ContactCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_tag(&mut self, tag: Tag) {
        if !self.tags.remove(&tag) {
            self.tags.insert(tag);
        }
    }
}
