//! Contact entity - the read-only snapshot the quiz is built from
//!
//! Contacts are owned by the external contact source. The quiz core never
//! mutates them; it filters and clones snapshots.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;
use crate::value_objects::{DisplayName, Hint, PhotoRef, Tag};
use crate::ContactId;

/// Relationship category a contact is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactCategory {
    Family,
    Friend,
    Work,
    Community,
    Other,
}

impl ContactCategory {
    /// All categories in display order
    pub const ALL: [ContactCategory; 5] = [
        ContactCategory::Family,
        ContactCategory::Friend,
        ContactCategory::Work,
        ContactCategory::Community,
        ContactCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friend => "friend",
            Self::Work => "work",
            Self::Community => "community",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "family" => Ok(Self::Family),
            "friend" | "friends" => Ok(Self::Friend),
            "work" => Ok(Self::Work),
            "community" => Ok(Self::Community),
            "other" => Ok(Self::Other),
            other => Err(DomainError::parse(format!(
                "Unknown contact category: {}",
                other
            ))),
        }
    }
}

/// A contact as supplied by the contact source
///
/// # Invariants
///
/// - `display_name` is always non-empty
/// - `photo_ref` and `hint`, when present, are non-blank (blank values are
///   dropped on the way in)
///
/// A contact can only be quizzed when it carries a photo or a hint; see
/// [`Contact::is_quizzable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    id: ContactId,
    display_name: DisplayName,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_photo_ref"
    )]
    photo_ref: Option<PhotoRef>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_hint"
    )]
    hint: Option<Hint>,
    category: ContactCategory,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

fn deserialize_photo_ref<'de, D>(deserializer: D) -> Result<Option<PhotoRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(PhotoRef::from_optional(raw))
}

fn deserialize_hint<'de, D>(deserializer: D) -> Result<Option<Hint>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(Hint::from_optional(raw))
}

impl Contact {
    pub fn new(id: ContactId, display_name: DisplayName, category: ContactCategory) -> Self {
        Self {
            id,
            display_name,
            photo_ref: None,
            hint: None,
            category,
            tags: BTreeSet::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// A blank reference leaves the contact without a photo.
    pub fn with_photo(mut self, photo_ref: PhotoRef) -> Self {
        self.photo_ref = Some(photo_ref).filter(|p| !p.is_blank());
        self
    }

    pub fn with_hint(mut self, hint: Hint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn photo_ref(&self) -> Option<&PhotoRef> {
        self.photo_ref.as_ref()
    }

    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    pub fn category(&self) -> ContactCategory {
        self.category
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// A contact with neither a photo nor a hint gives the player nothing to
    /// recognise and is never used as quiz material.
    pub fn is_quizzable(&self) -> bool {
        self.photo_ref.as_ref().is_some_and(|p| !p.is_blank()) || self.hint.is_some()
    }
}
