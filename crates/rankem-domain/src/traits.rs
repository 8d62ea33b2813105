//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Item, ItemId, Preference, Rank, RankId};

/// Trait for holding ranks and mutating their preference graph
///
/// Implemented by the infrastructure layer (rankem-store). Every mutation is
/// atomic: it either applies in full or fails and leaves the state untouched.
/// Mutations naming a rank or item that does not exist fail.
pub trait RankRepository {
    /// Error type for repository operations
    type Error;

    /// List every rank in creation order
    fn list_ranks(&self) -> Result<Vec<Rank>, Self::Error>;

    /// Get a rank by ID
    fn get_rank(&self, id: RankId) -> Result<Option<Rank>, Self::Error>;

    /// Get an item of a rank by ID
    fn get_item(&self, rank_id: RankId, item_id: ItemId) -> Result<Option<Item>, Self::Error>;

    /// Create a new empty rank
    fn create_rank(&mut self, name: &str) -> Result<Rank, Self::Error>;

    /// Delete a rank and all of its items
    fn delete_rank(&mut self, id: RankId) -> Result<(), Self::Error>;

    /// Append a new item to a rank
    fn add_item(&mut self, rank_id: RankId, name: &str) -> Result<Item, Self::Error>;

    /// Remove an item from a rank, leaving other items' edges untouched
    fn remove_item(&mut self, rank_id: RankId, item_id: ItemId) -> Result<(), Self::Error>;

    /// Record that `item_id` beats `other_id`
    fn add_better_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error>;

    /// Withdraw a recorded win of `item_id` over `other_id`
    fn remove_better_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error>;

    /// Record that `item_id` loses to `other_id`
    fn add_worse_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error>;

    /// Withdraw a recorded loss of `item_id` to `other_id`
    fn remove_worse_than_item(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
    ) -> Result<(), Self::Error>;

    /// Set the judgment of `item_id` against `other_id` in one step
    fn set_preference(
        &mut self,
        rank_id: RankId,
        item_id: ItemId,
        other_id: ItemId,
        preference: Preference,
    ) -> Result<(), Self::Error>;

    /// Run the rating engine over a rank and mark it sorted
    fn calculate_scores(&mut self, rank_id: RankId) -> Result<(), Self::Error>;

    /// Mark a rank unsorted so stale scores are no longer presented
    fn hide_ranking(&mut self, rank_id: RankId) -> Result<(), Self::Error>;
}

/// Trait for loading and saving the full rank list
///
/// Implemented by the infrastructure layer (rankem-store). Persistence sits
/// outside the repository: callers save after a mutation has completed.
pub trait StateStore {
    /// Error type for persistence operations
    type Error;

    /// Load every persisted rank; a missing record yields no ranks
    fn load(&self) -> Result<Vec<Rank>, Self::Error>;

    /// Replace the persisted record with `ranks`
    fn save(&mut self, ranks: &[Rank]) -> Result<(), Self::Error>;
}
