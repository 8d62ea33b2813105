//! Rating engine - Elo-style scores from pairwise preference edges
//!
//! The engine makes exactly one pass over a rank:
//! 1. Reset every score to the baseline
//! 2. Visit items in stored order
//! 3. For each resolvable `better_than` edge, update the pair with the item winning
//! 4. For each resolvable `worse_than` edge, update the pair with the item losing
//!
//! Updates are applied in place and sequentially, so later edges see the
//! scores produced by earlier ones. There is no convergence loop; the result
//! is a single-pass approximation and must stay reproducible as such.

use crate::{Item, ItemId, DEFAULT_SCORE};
use std::collections::HashMap;

/// Elo adjustment factor (how far one comparison moves a score)
pub const K_FACTOR: f64 = 32.0;

/// Outcome of one comparison from the first item's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The first item won
    Win,
    /// The first item lost
    Loss,
}

impl Outcome {
    /// Numeric outcome used by the Elo formula (1 for a win, 0 for a loss)
    pub fn value(&self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }
}

/// Expected score of a player rated `rating_a` against one rated `rating_b`
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Apply one Elo update and return the new `(rating_a, rating_b)`
pub fn update(rating_a: f64, rating_b: f64, outcome_a: f64, k: f64) -> (f64, f64) {
    let expected_a = expected_score(rating_a, rating_b);
    let expected_b = 1.0 - expected_a;
    (
        rating_a + k * (outcome_a - expected_a),
        rating_b + k * ((1.0 - outcome_a) - expected_b),
    )
}

/// Counts from one rating pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    /// Edges that resolved and produced an update
    pub applied: usize,
    /// Edges naming an item that is not part of the rank
    pub skipped: usize,
}

/// Single-pass Elo rating over a rank's items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingEngine {
    /// Adjustment factor per comparison
    pub k_factor: f64,
    /// Score every item is reset to before the pass
    pub baseline: f64,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            baseline: DEFAULT_SCORE,
        }
    }
}

impl RatingEngine {
    /// Create an engine with a custom adjustment factor and baseline
    pub fn new(k_factor: f64, baseline: f64) -> Self {
        Self { k_factor, baseline }
    }

    /// Recompute the score of every item in place
    ///
    /// Edges that do not resolve to an item of `items` are skipped. A
    /// self-referencing edge is rated against itself: both writes land on the
    /// same item and the second one wins, which keeps the score finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankem_domain::{Item, ItemId, RatingEngine};
    ///
    /// let mut items = vec![Item::new(ItemId::new(), "A"), Item::new(ItemId::new(), "B")];
    /// let b = items[1].id;
    /// items[0].add_better_than(b);
    ///
    /// RatingEngine::default().rate(&mut items);
    /// assert_eq!(items[0].score, 1016.0);
    /// assert_eq!(items[1].score, 984.0);
    /// ```
    pub fn rate(&self, items: &mut [Item]) -> RatingSummary {
        for item in items.iter_mut() {
            item.score = self.baseline;
        }

        let mut index: HashMap<ItemId, usize> = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            index.entry(item.id).or_insert(position);
        }

        let mut summary = RatingSummary::default();
        for a in 0..items.len() {
            let edges = items[a]
                .better_than
                .iter()
                .map(|id| (*id, Outcome::Win))
                .chain(items[a].worse_than.iter().map(|id| (*id, Outcome::Loss)))
                .collect::<Vec<_>>();

            for (other, outcome) in edges {
                match index.get(&other) {
                    Some(&b) => {
                        self.apply(items, a, b, outcome);
                        summary.applied += 1;
                    }
                    None => summary.skipped += 1,
                }
            }
        }

        summary
    }

    fn apply(&self, items: &mut [Item], a: usize, b: usize, outcome: Outcome) {
        let (rating_a, rating_b) =
            update(items[a].score, items[b].score, outcome.value(), self.k_factor);
        items[a].score = rating_a;
        items[b].score = rating_b;
    }
}
