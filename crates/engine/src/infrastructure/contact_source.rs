//! Contact source backed by a JSON file.
//!
//! The file holds an array of contacts in their camelCase wire form:
//!
//! ```json
//! [{ "id": "...", "displayName": "Ada", "photoRef": "ada.jpg", "category": "family", "tags": ["cousins"] }]
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rolodex_domain::Contact;

use crate::infrastructure::ports::{ContactSource, SourceError};

/// Reads the whole contact list on every fetch.
pub struct JsonFileContactSource {
    path: PathBuf,
}

impl JsonFileContactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContactSource for JsonFileContactSource {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, SourceError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::unavailable(format!(
                    "contact file {} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => return Err(SourceError::io("fetch_contacts", e)),
        };

        let contacts: Vec<Contact> =
            serde_json::from_slice(&raw).map_err(SourceError::serialization)?;

        tracing::debug!(
            path = %self.path.display(),
            count = contacts.len(),
            "Loaded contacts"
        );
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[tokio::test]
    async fn reads_contacts_from_file() {
        let file = write_file(
            r#"[
                {"id": "6f1c9a4e-2b7d-4c1e-9a8f-0d3e5b7c9a11", "displayName": "Ada", "photoRef": "ada.jpg", "category": "family", "tags": ["Cousins"]},
                {"id": "0b8e7d6c-5a4f-4e3d-8c2b-1a0f9e8d7c62", "displayName": "Grace", "hint": "Works on compilers", "category": "work"}
            ]"#,
        );

        let source = JsonFileContactSource::new(file.path());
        let contacts = source.fetch_contacts().await.expect("readable");

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].display_name().as_str(), "Ada");
        assert!(contacts[1].hint().is_some());
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = JsonFileContactSource::new(dir.path().join("nope.json"));

        let err = source.fetch_contacts().await.expect_err("missing file");
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_a_serialization_error() {
        let file = write_file("{ not json");
        let source = JsonFileContactSource::new(file.path());

        let err = source.fetch_contacts().await.expect_err("malformed");
        assert!(matches!(err, SourceError::Serialization(_)));
    }

    #[tokio::test]
    async fn invalid_contact_is_rejected() {
        let file = write_file(
            r#"[{"id": "6f1c9a4e-2b7d-4c1e-9a8f-0d3e5b7c9a11", "displayName": "   ", "category": "family"}]"#,
        );
        let source = JsonFileContactSource::new(file.path());

        assert!(source.fetch_contacts().await.is_err());
    }
}
