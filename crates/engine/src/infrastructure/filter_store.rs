//! Filter selection persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use rolodex_domain::FilterSelection;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{FilterStore, SourceError};

/// Stores the selection as pretty-printed JSON.
///
/// A missing file means nothing has been saved yet and loads as an empty
/// selection.
pub struct JsonFileFilterStore {
    path: PathBuf,
}

impl JsonFileFilterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilterStore for JsonFileFilterStore {
    async fn load(&self) -> Result<FilterSelection, SourceError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No saved filter, starting empty");
                return Ok(FilterSelection::empty());
            }
            Err(e) => return Err(SourceError::io("load_filter", e)),
        };
        serde_json::from_slice(&raw).map_err(SourceError::serialization)
    }

    async fn save(&self, selection: &FilterSelection) -> Result<(), SourceError> {
        let json = serde_json::to_vec_pretty(selection).map_err(SourceError::serialization)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SourceError::io("save_filter", e))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| SourceError::io("save_filter", e))?;
        tracing::debug!(path = %self.path.display(), "Saved filter");
        Ok(())
    }
}

/// Keeps the selection in memory for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryFilterStore {
    selection: RwLock<FilterSelection>,
}

impl InMemoryFilterStore {
    pub fn new(initial: FilterSelection) -> Self {
        Self {
            selection: RwLock::new(initial),
        }
    }
}

#[async_trait]
impl FilterStore for InMemoryFilterStore {
    async fn load(&self) -> Result<FilterSelection, SourceError> {
        Ok(self.selection.read().await.clone())
    }

    async fn save(&self, selection: &FilterSelection) -> Result<(), SourceError> {
        *self.selection.write().await = selection.clone();
        Ok(())
    }
}
