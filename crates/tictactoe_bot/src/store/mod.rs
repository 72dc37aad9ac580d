//! Score persistence.
//!
//! A store keeps a single [`ScoreRecord`] under the [`STORE_KEY`] entry of a
//! flat JSON object. Saves replace the whole record.

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreErrorKind};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::score::ScoreRecord;
use serde_json::{Map, Value};
use tracing::instrument;

/// Namespaced key the record is stored under.
pub const STORE_KEY: &str = "tictactoe_bot.progress";

/// Loads and saves the score record.
pub trait ScoreStore {
    /// Returns the last saved record, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage is unreadable or holds a
    /// malformed record.
    fn load(&self) -> Result<Option<ScoreRecord>, StoreError>;

    /// Overwrites the saved record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record could not be written.
    fn save(&self, record: &ScoreRecord) -> Result<(), StoreError>;
}

/// Serializes `record` as `{ STORE_KEY: { ... } }`.
#[instrument(skip(record))]
pub(crate) fn encode(record: &ScoreRecord) -> Result<String, StoreError> {
    let value = serde_json::to_value(record)
        .map_err(|e| StoreError::corrupt(format!("Failed to serialize record: {}", e)))?;
    let mut doc = Map::new();
    doc.insert(STORE_KEY.to_string(), value);
    serde_json::to_string_pretty(&Value::Object(doc))
        .map_err(|e| StoreError::corrupt(format!("Failed to serialize document: {}", e)))
}

/// Parses a document written by [`encode`].
///
/// A document without [`STORE_KEY`] holds no record and yields `None`.
#[instrument(skip(text))]
pub(crate) fn decode(text: &str) -> Result<Option<ScoreRecord>, StoreError> {
    let mut doc: Map<String, Value> = serde_json::from_str(text)
        .map_err(|e| StoreError::corrupt(format!("Malformed document: {}", e)))?;

    let Some(value) = doc.remove(STORE_KEY) else {
        return Ok(None);
    };

    let record: ScoreRecord = serde_json::from_value(value)
        .map_err(|e| StoreError::corrupt(format!("Malformed record: {}", e)))?;

    if !record.is_valid() {
        return Err(StoreError::corrupt(format!(
            "Month {} out of range",
            record.month()
        )));
    }

    Ok(Some(record))
}
