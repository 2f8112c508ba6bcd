//! Saving and loading the ledger to and from a key-value blob store.
//!
//! The whole ledger is written as one JSON array under a single key on every
//! change, the same way the browser version of the app used local storage.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};

use crate::{LedgerConfig, transaction::Transaction};

/// Errors originating from reading or writing the persisted ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PersistenceError {
    /// The blob store could not be read from or written to.
    #[error("the blob store is unavailable: {0}")]
    Unavailable(String),

    /// The stored text exists but is not a valid ledger.
    ///
    /// This is never treated as an empty ledger, otherwise the next save
    /// would silently overwrite the damaged data.
    #[error("the stored ledger is corrupt: {0}")]
    Corrupt(String),

    /// The ledger could not be encoded as JSON.
    #[error("the ledger could not be serialized: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        PersistenceError::Unavailable(error.to_string())
    }
}

/// An opaque string-keyed store of text blobs.
pub trait BlobStore {
    /// Read the blob stored under `key`, or `None` if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// A [BlobStore] that keeps blobs in memory for the life of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A [BlobStore] backed by a single key-value table in a SQLite database.
#[derive(Debug)]
pub struct SqliteBlobStore {
    connection: Connection,
}

impl SqliteBlobStore {
    /// Wrap `connection`, creating the blob table if it does not exist yet.
    ///
    /// # Errors
    /// Returns [PersistenceError::Unavailable] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, PersistenceError> {
        create_blob_table(&connection)?;

        Ok(Self { connection })
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = self
            .connection
            .prepare("SELECT value FROM blob WHERE key = ?1")?
            .query_row([key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.connection.execute(
            "INSERT INTO blob (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

/// Create the blob table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
fn create_blob_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS blob (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Serializes the ledger into a [BlobStore] under a fixed key.
#[derive(Debug)]
pub struct PersistenceAdapter<B> {
    store: B,
    key: String,
}

impl<B: BlobStore> PersistenceAdapter<B> {
    /// Create an adapter that saves to `store` under the key set in `config`.
    pub fn new(store: B, config: &LedgerConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
        }
    }

    /// Write the full record set to the blob store.
    ///
    /// # Errors
    /// This function will return a:
    /// - [PersistenceError::Serialization] if the records cannot be encoded,
    /// - or [PersistenceError::Unavailable] if the blob store rejects the write.
    pub fn save(&mut self, records: &[Transaction]) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(records).map_err(|error| {
            tracing::error!("could not serialize {} transactions: {error}", records.len());
            PersistenceError::Serialization(error.to_string())
        })?;

        self.store.set(&self.key, &blob)
    }

    /// Read the stored records, or `None` if nothing has been saved yet.
    ///
    /// An empty blob is treated the same as a missing one.
    ///
    /// # Errors
    /// This function will return a:
    /// - [PersistenceError::Corrupt] if the stored text is not a valid ledger,
    /// - or [PersistenceError::Unavailable] if the blob store cannot be read.
    pub fn load(&self) -> Result<Option<Vec<Transaction>>, PersistenceError> {
        let blob = match self.store.get(&self.key)? {
            Some(blob) if !blob.trim().is_empty() => blob,
            _ => return Ok(None),
        };

        let records = serde_json::from_str(&blob).map_err(|error| {
            tracing::error!("stored ledger under \"{}\" is corrupt: {error}", self.key);
            PersistenceError::Corrupt(error.to_string())
        })?;

        Ok(Some(records))
    }

    /// The underlying blob store.
    pub fn store(&self) -> &B {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut B {
        &mut self.store
    }
}
