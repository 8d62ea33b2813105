//! SQLite-backed persistence of the full rank list
//!
//! The whole state is saved as one versioned record keyed by a namespace,
//! replaced on every save. A database without a record loads as zero ranks.

use crate::error::StoreError;
use crate::records::PersistedState;
use rankem_domain::traits::StateStore;
use rankem_domain::Rank;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Namespace the record is stored under unless another one is given
pub const DEFAULT_NAMESPACE: &str = "rankem";

/// Payload schema version written by this build
pub const SCHEMA_VERSION: u32 = 0;

/// SQLite-based implementation of StateStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStateStore instance.
pub struct SqliteStateStore {
    conn: Connection,
    namespace: String,
}

impl SqliteStateStore {
    /// Open (or create) the database at `path` using the default namespace
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```
    /// use rankem_domain::traits::StateStore;
    /// use rankem_store::SqliteStateStore;
    ///
    /// let store = SqliteStateStore::new(":memory:").unwrap();
    /// assert!(store.load().unwrap().is_empty());
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_namespace(path, DEFAULT_NAMESPACE)
    }

    /// Open (or create) the database at `path`, storing the record under `namespace`
    pub fn with_namespace<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            namespace: namespace.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Namespace the record is stored under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<Rank>, Self::Error> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT version, payload FROM snapshots WHERE namespace = ?1",
                params![&self.namespace],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((version, payload)) = row else {
            debug!("No persisted record under '{}', starting empty", self.namespace);
            return Ok(Vec::new());
        };

        let version = u32::try_from(version)
            .map_err(|_| StoreError::InvalidData(format!("Invalid schema version {}", version)))?;
        if version > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: version,
                supported: SCHEMA_VERSION,
            });
        }

        let state: PersistedState = serde_json::from_str(&payload)?;
        let ranks = state.into_ranks()?;
        info!("Loaded {} rank(s) from '{}'", ranks.len(), self.namespace);
        Ok(ranks)
    }

    fn save(&mut self, ranks: &[Rank]) -> Result<(), Self::Error> {
        let payload = serde_json::to_string(&PersistedState::from_ranks(ranks))?;
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        self.conn.execute(
            "INSERT INTO snapshots (namespace, version, payload, saved_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace) DO UPDATE SET
             version = excluded.version, payload = excluded.payload, saved_at = excluded.saved_at",
            params![&self.namespace, SCHEMA_VERSION, &payload, saved_at],
        )?;

        debug!("Saved {} rank(s) to '{}'", ranks.len(), self.namespace);
        Ok(())
    }
}
