//! Storage Slots

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised when writing a storage slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The slot's backing file could not be written.
    #[error("failed to write cart slot {}", path.display())]
    Write {
        /// Path of the backing file.
        path: PathBuf,

        /// Underlying io error.
        #[source]
        source: io::Error,
    },

    /// The slot's backing store is unavailable.
    #[error("cart slot unavailable")]
    Unavailable,
}

/// Whole-value durable slot holding the serialized cart.
///
/// One write replaces the entire payload; there is no merge and no locking.
/// Two writers sharing a slot are last-writer-wins by design. A reader that
/// cannot produce a payload returns `None` rather than an error — the caller
/// treats that the same as an empty slot.
pub trait StorageSlot {
    /// Returns the stored payload, if any.
    fn read(&self) -> Option<String>;

    /// Replaces the stored payload.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if the payload could not be stored.
    fn write(&mut self, payload: &str) -> Result<(), SlotError>;
}

/// File-backed slot: one JSON document on local disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates a slot backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        std::fs::write(&self.path, payload).map_err(|source| SlotError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory slot for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-loaded with a payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.payload.clone()
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}
