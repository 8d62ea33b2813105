//! Serialized form of the persisted state
//!
//! Ids are stored as hyphenated UUID strings and field names are camelCase,
//! so the payload reads the same as the record written by earlier releases.

use crate::error::StoreError;
use rankem_domain::{Item, ItemId, Rank, RankId, DEFAULT_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// The full persisted record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// Every rank in creation order
    #[serde(default)]
    pub ranks: Vec<RankRecord>,
}

/// A persisted rank
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRecord {
    /// Rank identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Items in creation order
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    /// Whether scores reflect a completed rating pass
    #[serde(default)]
    pub sorted: bool,
}

/// A persisted item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Item identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Ids of items this one beats
    #[serde(default)]
    pub better_than: Vec<String>,
    /// Ids of items this one loses to
    #[serde(default)]
    pub worse_than: Vec<String>,
    /// Rating
    #[serde(default = "default_score")]
    pub score: f64,
}

fn default_score() -> f64 {
    DEFAULT_SCORE
}

impl PersistedState {
    /// Build the record for a list of ranks
    pub fn from_ranks(ranks: &[Rank]) -> Self {
        Self {
            ranks: ranks.iter().map(RankRecord::from).collect(),
        }
    }

    /// Convert the record back into domain ranks
    ///
    /// Rank ids must be unique. Item-level checks happen in the
    /// `TryFrom` conversions below.
    pub fn into_ranks(self) -> Result<Vec<Rank>, StoreError> {
        let ranks = self
            .ranks
            .into_iter()
            .map(Rank::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = ranks.iter().find(|rank| !seen.insert(rank.id)) {
            return Err(StoreError::InvalidData(format!(
                "Duplicate rank id {}",
                duplicate.id
            )));
        }
        Ok(ranks)
    }
}

impl From<&Rank> for RankRecord {
    fn from(rank: &Rank) -> Self {
        Self {
            id: rank.id.to_string(),
            name: rank.name.clone(),
            items: rank.items.iter().map(ItemRecord::from).collect(),
            sorted: rank.sorted,
        }
    }
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            better_than: item.better_than.iter().map(ItemId::to_string).collect(),
            worse_than: item.worse_than.iter().map(ItemId::to_string).collect(),
            score: item.score,
        }
    }
}

impl TryFrom<RankRecord> for Rank {
    type Error = StoreError;

    fn try_from(record: RankRecord) -> Result<Self, Self::Error> {
        let id = RankId::from_string(&record.id).map_err(StoreError::InvalidData)?;
        let items = record
            .items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<Item>, _>>()?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id)) {
            return Err(StoreError::InvalidData(format!(
                "Duplicate item id {} in rank {}",
                duplicate.id, id
            )));
        }

        Ok(Rank {
            id,
            name: record.name,
            items,
            sorted: record.sorted,
        })
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = StoreError;

    /// Edge lists are deduplicated keeping the first occurrence. An id listed
    /// as both better and worse keeps only the `betterThan` edge.
    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let id = parse_item_id(&record.id)?;
        let better_than = parse_edges(&record.better_than)?;
        let mut worse_than = parse_edges(&record.worse_than)?;

        let before = worse_than.len();
        worse_than.retain(|other| !better_than.contains(other));
        if worse_than.len() != before {
            warn!(
                "Item {} listed {} item(s) as both better and worse; kept the betterThan edge",
                id,
                before - worse_than.len()
            );
        }

        Ok(Item {
            id,
            name: record.name,
            better_than,
            worse_than,
            score: record.score,
        })
    }
}

fn parse_item_id(s: &str) -> Result<ItemId, StoreError> {
    ItemId::from_string(s).map_err(StoreError::InvalidData)
}

fn parse_edges(ids: &[String]) -> Result<Vec<ItemId>, StoreError> {
    let mut edges = Vec::with_capacity(ids.len());
    for id in ids {
        let id = parse_item_id(id)?;
        if !edges.contains(&id) {
            edges.push(id);
        }
    }
    Ok(edges)
}
