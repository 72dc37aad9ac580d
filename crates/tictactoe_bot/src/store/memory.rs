//! In-memory store for tests and embedding.

use super::{ScoreStore, StoreError, decode, encode};
use crate::score::ScoreRecord;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Inner {
    text: Mutex<Option<String>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

/// Store that keeps the serialized document in memory.
///
/// Clones share the same contents, so a test can keep a handle while a
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `record`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be serialized.
    pub fn with_record(record: &ScoreRecord) -> Result<Self, StoreError> {
        let store = Self::new();
        *store.text() = Some(encode(record)?);
        Ok(store)
    }

    /// Replaces the stored document with arbitrary text.
    pub fn corrupt_with(&self, text: impl Into<String>) {
        *self.text() = Some(text.into());
    }

    /// Makes subsequent saves fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    /// The raw stored document, if any.
    pub fn raw(&self) -> Option<String> {
        self.text().clone()
    }

    fn text(&self) -> MutexGuard<'_, Option<String>> {
        self.inner.text.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ScoreStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Option<ScoreRecord>, StoreError> {
        match self.text().as_deref() {
            Some(text) => decode(text),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, record))]
    fn save(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::io("Memory store is refusing writes"));
        }
        *self.text() = Some(encode(record)?);
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        debug!("Progress saved in memory");
        Ok(())
    }
}
