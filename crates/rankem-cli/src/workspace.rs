//! The opened database: an in-memory store backed by SQLite.

use crate::error::Result;
use crate::resolve;
use rankem_domain::traits::{RankRepository, StateStore};
use rankem_domain::{Item, Rank, RatingEngine};
use rankem_store::{SqliteStateStore, Store};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Owns the rank store and the persistence it was loaded from.
///
/// Commands mutate the store and then call [`Workspace::commit`] to write the
/// new snapshot back. If the write fails the in-memory state is kept and the
/// error is returned to the caller.
pub struct Workspace {
    store: Store,
    persistence: SqliteStateStore,
}

impl Workspace {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path, engine: RatingEngine) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at {}", path.display());
        let persistence = SqliteStateStore::new(path)?;
        Self::from_persistence(persistence, engine)
    }

    /// A workspace on a private in-memory database.
    pub fn in_memory(engine: RatingEngine) -> Result<Self> {
        Self::from_persistence(SqliteStateStore::new(":memory:")?, engine)
    }

    fn from_persistence(persistence: SqliteStateStore, engine: RatingEngine) -> Result<Self> {
        let ranks = persistence.load()?;
        debug!("Loaded {} rank(s)", ranks.len());
        Ok(Self {
            store: Store::from_ranks(ranks).with_engine(engine),
            persistence,
        })
    }

    /// The rank store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The rank store, for mutation.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Persist the current snapshot.
    pub fn commit(&mut self) -> Result<()> {
        let snapshot = self.store.snapshot();
        self.persistence.save(&snapshot.to_ranks())?;
        Ok(())
    }

    /// Look up a rank by id, id prefix or name.
    pub fn rank(&self, query: &str) -> Result<Rank> {
        let ranks = self.store.list_ranks()?;
        resolve::resolve_rank(&ranks, query).cloned()
    }

    /// Look up a rank and one of its items.
    pub fn item(&self, rank_query: &str, item_query: &str) -> Result<(Rank, Item)> {
        let rank = self.rank(rank_query)?;
        let item = resolve::resolve_item(&rank, item_query)?.clone();
        Ok((rank, item))
    }
}
