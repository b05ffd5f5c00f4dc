use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::model::document::Document;

/// Error type for document persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// File name of the task document inside the cache directory
pub const DOCUMENT_FILE: &str = "tasks.json";

/// Default document location: `<cache_dir>/ctxdo/tasks.json`
pub fn default_document_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ctxdo")
        .join(DOCUMENT_FILE)
}

/// The persisted task document at a fixed path.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document without any fallback.
    pub fn try_load(&self) -> Result<Document, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        let mut doc: Document =
            serde_json::from_str(&text).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        doc.normalize_next_id();
        Ok(doc)
    }

    /// Load the document, substituting the seed document when it is absent,
    /// unreadable or malformed.
    pub fn load(&self) -> Document {
        match self.try_load() {
            Ok(doc) => {
                debug!(
                    path = %self.path.display(),
                    tasks = doc.tasks.len(),
                    "loaded task document"
                );
                doc
            }
            Err(StoreError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task document, using seed");
                Document::seed()
            }
            Err(e) => {
                warn!("{e}; starting from the seed document");
                Document::seed()
            }
        }
    }

    /// Write the whole document, creating the containing directory if needed.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let data = serde_json::to_string_pretty(doc)?;
        atomic_write(&self.path, data.as_bytes()).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
