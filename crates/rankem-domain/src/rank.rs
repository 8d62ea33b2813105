//! Rank module - a named list of comparable items

use crate::id::fresh_id;
use crate::rating::RatingSummary;
use crate::{Item, ItemId, RankId, RatingEngine};

/// A named, user-defined list of items
///
/// Items are kept in creation order. That order is what a caller sees before
/// the first rating pass, and it is also the order the rating pass visits items in.
#[derive(Debug, Clone, PartialEq)]
pub struct Rank {
    /// Unique identifier within the store
    pub id: RankId,

    /// Display name
    pub name: String,

    /// Items in creation order
    pub items: Vec<Item>,

    /// Whether item scores reflect a completed rating pass
    pub sorted: bool,
}

/// How one item relates to another in its `better_than` / `worse_than` sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    /// The item beats the other one
    Better,
    /// The item loses to the other one
    Worse,
    /// No judgment recorded
    None,
}

impl Preference {
    /// Get the preference name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Better => "better",
            Preference::Worse => "worse",
            Preference::None => "none",
        }
    }

    /// Parse a preference from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "better" | "b" | ">" => Some(Preference::Better),
            "worse" | "w" | "<" => Some(Preference::Worse),
            "none" | "n" | "clear" => Some(Preference::None),
            _ => None,
        }
    }
}

/// Another item of the rank, seen from a selected item
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The other item
    pub item: Item,
    /// The selected item's judgment against it
    pub preference: Preference,
}

impl Rank {
    /// Create a new empty, unsorted rank
    pub fn new(id: RankId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
            sorted: false,
        }
    }

    /// Look up an item by id
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look up an item by id for mutation
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Check whether an item with this id belongs to the rank
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Append a new item with a fresh id and return a copy of it
    pub fn push_item(&mut self, name: impl Into<String>) -> Item {
        let id = fresh_id(ItemId::new, |candidate| self.contains_item(*candidate));
        let item = Item::new(id, name);
        self.items.push(item.clone());
        item
    }

    /// Remove an item, returning it if it was present
    ///
    /// Other items' edges pointing at the removed item are left as they are;
    /// the rating pass skips references that no longer resolve.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Recompute every score with `engine` and mark the rank sorted
    pub fn calculate_scores(&mut self, engine: &RatingEngine) -> RatingSummary {
        let summary = engine.rate(&mut self.items);
        self.sorted = true;
        summary
    }

    /// Items in presentation order
    ///
    /// Descending score once the rank is sorted, creation order otherwise.
    /// The sort is stable, so tied items keep their creation order.
    pub fn display_order(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        if self.sorted {
            items.sort_by(|a, b| b.score.total_cmp(&a.score));
        }
        items
    }

    /// Every other item of the rank paired with `id`'s judgment against it
    ///
    /// Returns `None` if `id` is not an item of this rank.
    pub fn comparisons(&self, id: ItemId) -> Option<Vec<Comparison>> {
        let selected = self.item(id)?;
        let comparisons = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .map(|item| Comparison {
                item: item.clone(),
                preference: if selected.is_better_than(item.id) {
                    Preference::Better
                } else if selected.is_worse_than(item.id) {
                    Preference::Worse
                } else {
                    Preference::None
                },
            })
            .collect();
        Some(comparisons)
    }
}
