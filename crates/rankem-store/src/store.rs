//! In-memory preference graph store
//!
//! The canonical state is an immutable [`StoreState`] behind an `Arc`. Every
//! mutation works on a copy and swaps it in only once it has fully succeeded,
//! so a reader holding a snapshot sees either the state before a mutation or
//! the state after it, never a partially applied one.
//!
//! Copies are cheap: the state is a vector of `Arc<Rank>`, and only the rank a
//! mutation touches is cloned (via `Arc::make_mut`).

use crate::error::StoreError;
use rankem_domain::id::fresh_id;
use rankem_domain::traits::RankRepository;
use rankem_domain::{Item, ItemId, Preference, Rank, RankId, RatingEngine};
use std::sync::Arc;
use tracing::{debug, info};

/// An immutable view of every rank in the store
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    ranks: Vec<Arc<Rank>>,
}

impl StoreState {
    /// Build a state from a list of ranks, keeping their order
    pub fn from_ranks(ranks: Vec<Rank>) -> Self {
        Self {
            ranks: ranks.into_iter().map(Arc::new).collect(),
        }
    }

    /// Iterate over ranks in creation order
    pub fn ranks(&self) -> impl Iterator<Item = &Rank> {
        self.ranks.iter().map(|rank| rank.as_ref())
    }

    /// Look up a rank by ID
    pub fn rank(&self, id: RankId) -> Option<&Rank> {
        self.ranks().find(|rank| rank.id == id)
    }

    /// Look up an item by rank and item ID
    pub fn item(&self, rank_id: RankId, item_id: ItemId) -> Option<&Item> {
        self.rank(rank_id)?.item(item_id)
    }

    /// Number of ranks
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the store holds no ranks
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Owned copies of every rank, for persistence
    pub fn to_ranks(&self) -> Vec<Rank> {
        self.ranks().cloned().collect()
    }

    fn rank_mut(&mut self, id: RankId) -> Result<&mut Rank, StoreError> {
        self.ranks
            .iter_mut()
            .find(|rank| rank.id == id)
            .map(Arc::make_mut)
            .ok_or(StoreError::RankNotFound(id))
    }
}

/// Preference graph store
///
/// Holds the ranks, validates every mutation and runs the rating engine.
/// The store performs no I/O; persistence is done by whoever owns it.
///
/// # Examples
///
/// ```
/// use rankem_domain::traits::RankRepository;
/// use rankem_store::Store;
///
/// let mut store = Store::new();
/// let rank = store.create_rank("Fruits").unwrap();
/// let apple = store.add_item(rank.id, "Apple").unwrap();
/// let banana = store.add_item(rank.id, "Banana").unwrap();
///
/// store.add_better_than_item(rank.id, apple.id, banana.id).unwrap();
/// store.calculate_scores(rank.id).unwrap();
///
/// let apple = store.get_item(rank.id, apple.id).unwrap().unwrap();
/// assert_eq!(apple.score, 1016.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<StoreState>,
    engine: RatingEngine,
}

impl Store {
    /// Create an empty store with the default rating engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding previously persisted ranks
    pub fn from_ranks(ranks: Vec<Rank>) -> Self {
        Self {
            state: Arc::new(StoreState::from_ranks(ranks)),
            engine: RatingEngine::default(),
        }
    }

    /// Replace the rating engine used by `calculate_scores`
    pub fn with_engine(mut self, engine: RatingEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The rating engine in use
    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    /// The current state
    ///
    /// The returned handle never changes, whatever mutations follow.
    pub fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&self.state)
    }

    /// Run `mutation` against a copy of the state
    ///
    /// The copy replaces the current state only if the mutation succeeded and
    /// reported a change.
    fn transact<T, F>(&mut self, mutation: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut StoreState) -> Result<(T, bool), StoreError>,
    {
        let mut next = StoreState::clone(&self.state);
        let (output, changed) = mutation(&mut next)?;
        if changed {
            self.state = Arc::new(next);
        }
        Ok(output)
    }

    /// Apply `edit` to one item after checking that the rank, the item and
    /// (when given) the other item exist
    fn edit_item<F>(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        required_other: Option<ItemId>,
        edit: F,
    ) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Item) -> bool,
    {
        self.transact(|state| {
            let rank = state.rank_mut(rank_id)?;
            if !rank.contains_item(item_id) {
                return Err(StoreError::ItemNotFound {
                    rank: rank_id,
                    item: item_id,
                });
            }
            if let Some(other_id) = required_other {
                if !rank.contains_item(other_id) {
                    return Err(StoreError::ItemNotFound {
                        rank: rank_id,
                        item: other_id,
                    });
                }
            }
            let item = rank.item_mut(item_id).ok_or(StoreError::ItemNotFound {
                rank: rank_id,
                item: item_id,
            })?;
            let changed = edit(item);
            Ok((changed, changed))
        })
    }
}

impl RankRepository for Store {
    type Error = StoreError;

    fn list_ranks(&self) -> Result<Vec<Rank>, Self::Error> {
        Ok(self.state.to_ranks())
    }

    fn get_rank(&self, id: RankId) -> Result<Option<Rank>, Self::Error> {
        Ok(self.state.rank(id).cloned())
    }

    fn get_item(&self, rank_id: RankId, item_id: ItemId) -> Result<Option<Item>, Self::Error> {
        Ok(self.state.item(rank_id, item_id).cloned())
    }

    fn create_rank(&mut self, name: &str) -> Result<Rank, Self::Error> {
        let rank = self.transact(|state| {
            let id = fresh_id(RankId::new, |candidate| state.rank(*candidate).is_some());
            let rank = Rank::new(id, name);
            state.ranks.push(Arc::new(rank.clone()));
            Ok((rank, true))
        })?;
        debug!("Created rank {} ({})", rank.id, rank.name);
        Ok(rank)
    }

    fn delete_rank(&mut self, id: RankId) -> Result<(), Self::Error> {
        self.transact(|state| {
            let index = state
                .ranks
                .iter()
                .position(|rank| rank.id == id)
                .ok_or(StoreError::RankNotFound(id))?;
            state.ranks.remove(index);
            Ok(((), true))
        })?;
        debug!("Deleted rank {}", id);
        Ok(())
    }

    fn add_item(&mut self, rank_id: RankId, name: &str) -> Result<Item, Self::Error> {
        let item = self.transact(|state| {
            let rank = state.rank_mut(rank_id)?;
            Ok((rank.push_item(name), true))
        })?;
        debug!("Added item {} ({}) to rank {}", item.id, item.name, rank_id);
        Ok(item)
    }

    fn remove_item(&mut self, rank_id: RankId, item_id: ItemId) -> Result<(), Self::Error> {
        self.transact(|state| {
            let rank = state.rank_mut(rank_id)?;
            rank.remove_item(item_id).ok_or(StoreError::ItemNotFound {
                rank: rank_id,
                item: item_id,
            })?;
            Ok(((), true))
        })?;
        debug!("Removed item {} from rank {}", item_id, rank_id);
        Ok(())
    }

    fn add_better_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error> {
        let changed = self.edit_item(rank_id, item_id, Some(other_id), |item| {
            item.add_better_than(other_id)
        })?;
        debug!("{} better than {} (changed: {})", item_id, other_id, changed);
        Ok(())
    }

    fn remove_better_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error> {
        let changed = self.edit_item(rank_id, item_id, None, |item| {
            item.remove_better_than(other_id)
        })?;
        debug!("{} no longer better than {} (changed: {})", item_id, other_id, changed);
        Ok(())
    }

    fn add_worse_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error> {
        let changed = self.edit_item(rank_id, item_id, Some(other_id), |item| {
            item.add_worse_than(other_id)
        })?;
        debug!("{} worse than {} (changed: {})", item_id, other_id, changed);
        Ok(())
    }

    fn remove_worse_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error> {
        let changed = self.edit_item(rank_id, item_id, None, |item| {
            item.remove_worse_than(other_id)
        })?;
        debug!("{} no longer worse than {} (changed: {})", item_id, other_id, changed);
        Ok(())
    }

    fn set_preference(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
        preference: Preference,
    ) -> Result<(), Self::Error> {
        let required_other = match preference {
            Preference::None => None,
            Preference::Better | Preference::Worse => Some(other_id),
        };
        let changed = self.edit_item(rank_id, item_id, required_other, |item| match preference {
            Preference::Better => item.add_better_than(other_id),
            Preference::Worse => item.add_worse_than(other_id),
            Preference::None => {
                let better = item.remove_better_than(other_id);
                let worse = item.remove_worse_than(other_id);
                better || worse
            }
        })?;
        debug!(
            "{} set {} against {} (changed: {})",
            item_id,
            preference.as_str(),
            other_id,
            changed
        );
        Ok(())
    }

    fn calculate_scores(&mut self, rank_id: RankId) -> Result<(), Self::Error> {
        let engine = self.engine;
        let summary = self.transact(|state| {
            let rank = state.rank_mut(rank_id)?;
            Ok((rank.calculate_scores(&engine), true))
        })?;
        info!(
            "Calculated scores for rank {}: {} comparisons applied, {} dangling skipped",
            rank_id, summary.applied, summary.skipped
        );
        Ok(())
    }

    fn hide_ranking(&mut self, rank_id: RankId) -> Result<(), Self::Error> {
        self.transact(|state| {
            let rank = state.rank_mut(rank_id)?;
            let changed = rank.sorted;
            rank.sorted = false;
            Ok(((), changed))
        })?;
        debug!("Hid ranking of rank {}", rank_id);
        Ok(())
    }
}
