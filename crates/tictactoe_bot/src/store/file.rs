//! JSON file store.

use super::{ScoreStore, StoreError, decode, encode};
use crate::score::ScoreRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Stores the record in a JSON file.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// reader never sees a half-written record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<ScoreRecord>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved progress");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::io(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let record = decode(&text)?;
        debug!(found = record.is_some(), "Progress loaded");
        Ok(record)
    }

    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn save(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        let text = encode(record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, text).map_err(|e| {
            StoreError::io(format!("Failed to write '{}': {}", temp.display(), e))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            StoreError::io(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        info!(period = %record.period(), "Progress saved");
        Ok(())
    }
}
