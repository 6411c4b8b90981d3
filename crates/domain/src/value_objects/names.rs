//! Validated newtypes for contact fields
//!
//! These newtypes are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for display names
const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for tags
const MAX_TAG_LENGTH: usize = 50;

/// Maximum length for quiz hints
const MAX_HINT_LENGTH: usize = 500;

// ============================================================================
// DisplayName
// ============================================================================

/// A validated contact display name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new validated display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Display name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Display name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> String {
        name.0
    }
}

// ============================================================================
// Tag
// ============================================================================

/// A validated tag (non-empty, <=50 chars, trimmed, lowercase)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Create a new validated tag.
    ///
    /// The tag is trimmed and converted to lowercase, so `"Book Club"` and
    /// `"book club"` select the same contacts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The tag is empty after trimming
    /// - The tag exceeds 50 characters after trimming
    pub fn new(tag: impl Into<String>) -> Result<Self, DomainError> {
        let tag = tag.into();
        let trimmed = tag.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Tag cannot be empty"));
        }
        if trimmed.chars().count() > MAX_TAG_LENGTH {
            return Err(DomainError::validation(format!(
                "Tag cannot exceed {} characters",
                MAX_TAG_LENGTH
            )));
        }
        Ok(Self(trimmed))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> String {
        tag.0
    }
}

// ============================================================================
// PhotoRef
// ============================================================================

/// Opaque reference to a contact photo (URL, asset key, file path...).
///
/// The quiz core never dereferences it; it only checks presence and hands it
/// back to the host in the render model. A blank reference counts as no photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build a reference from optional text, treating blank text as absent.
    pub fn from_optional(reference: Option<String>) -> Option<Self> {
        reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .map(Self)
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Hint
// ============================================================================

/// A quiz hint shown in place of (or next to) a photo (non-empty, <=500 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hint(String);

impl Hint {
    /// Create a new validated hint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the hint is blank or longer than
    /// 500 characters after trimming.
    pub fn new(hint: impl Into<String>) -> Result<Self, DomainError> {
        let hint = hint.into();
        let trimmed = hint.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Hint cannot be empty"));
        }
        if trimmed.chars().count() > MAX_HINT_LENGTH {
            return Err(DomainError::validation(format!(
                "Hint cannot exceed {} characters",
                MAX_HINT_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build a hint from optional free text, treating blank text as absent.
    pub fn from_optional(hint: Option<String>) -> Option<Self> {
        hint.and_then(|h| Self::new(h).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Hint {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Hint> for String {
    fn from(hint: Hint) -> String {
        hint.0
    }
}
