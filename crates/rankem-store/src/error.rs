//! Error types for store and persistence operations

use rankem_domain::{ItemId, RankId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Rank not found
    #[error("Rank not found: {0}")]
    RankNotFound(RankId),

    /// Item not found in the given rank
    #[error("Item not found: {item} (rank {rank})")]
    ItemNotFound {
        /// Rank that was searched
        rank: RankId,
        /// Item that is missing
        item: ItemId,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Persisted record was written by a newer schema
    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the record
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },
}

impl StoreError {
    /// Whether this error reports a missing rank or item
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::RankNotFound(_) | StoreError::ItemNotFound { .. })
    }
}
