//! Catalog reader: serves the static content documents from disk.
//!
//! Each topic maps to `<catalog_dir>/<topic>.json`. Reads are pure and
//! per-request; the documents change only on deploy.

use std::path::PathBuf;

use karvan_core::catalog::CatalogTopic;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No catalog document for topic '{0}'")]
    NotFound(CatalogTopic),

    #[error("Failed to read catalog document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog document for '{topic}' is not valid JSON: {source}")]
    Format {
        topic: CatalogTopic,
        source: serde_json::Error,
    },
}

/// Read-only store of catalog documents.
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read and parse the document backing `topic`.
    pub async fn read(&self, topic: CatalogTopic) -> Result<serde_json::Value, CatalogError> {
        let path = self.dir.join(topic.file_name());

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(topic))
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|source| CatalogError::Format { topic, source })
    }
}
