//! Item module - an entry within a rank

use crate::ItemId;

/// Score every item starts from, and the baseline each rating pass resets to
pub const DEFAULT_SCORE: f64 = 1000.0;

/// An item of a rank together with its outgoing preference edges
///
/// `better_than` and `worse_than` have set semantics (no duplicates) but keep
/// insertion order, since the rating pass visits edges in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique identifier within the owning rank
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Items this item is asserted to beat
    pub better_than: Vec<ItemId>,

    /// Items this item is asserted to lose to
    pub worse_than: Vec<ItemId>,

    /// Rating, only meaningful once the owning rank is sorted
    pub score: f64,
}

impl Item {
    /// Create a new item with no edges and the default score
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            better_than: Vec::new(),
            worse_than: Vec::new(),
            score: DEFAULT_SCORE,
        }
    }

    /// Whether this item is asserted to beat `other`
    pub fn is_better_than(&self, other: ItemId) -> bool {
        self.better_than.contains(&other)
    }

    /// Whether this item is asserted to lose to `other`
    pub fn is_worse_than(&self, other: ItemId) -> bool {
        self.worse_than.contains(&other)
    }

    /// Record that this item beats `other`, clearing the opposite edge
    ///
    /// Returns `true` if the edge set changed.
    pub fn add_better_than(&mut self, other: ItemId) -> bool {
        let removed = remove_edge(&mut self.worse_than, other);
        insert_edge(&mut self.better_than, other) || removed
    }

    /// Record that this item loses to `other`, clearing the opposite edge
    ///
    /// Returns `true` if the edge set changed.
    pub fn add_worse_than(&mut self, other: ItemId) -> bool {
        let removed = remove_edge(&mut self.better_than, other);
        insert_edge(&mut self.worse_than, other) || removed
    }

    /// Drop `other` from `better_than`; returns `true` if it was present
    pub fn remove_better_than(&mut self, other: ItemId) -> bool {
        remove_edge(&mut self.better_than, other)
    }

    /// Drop `other` from `worse_than`; returns `true` if it was present
    pub fn remove_worse_than(&mut self, other: ItemId) -> bool {
        remove_edge(&mut self.worse_than, other)
    }
}

fn insert_edge(edges: &mut Vec<ItemId>, id: ItemId) -> bool {
    if edges.contains(&id) {
        return false;
    }
    edges.push(id);
    true
}

fn remove_edge(edges: &mut Vec<ItemId>, id: ItemId) -> bool {
    let before = edges.len();
    edges.retain(|edge| *edge != id);
    edges.len() != before
}
