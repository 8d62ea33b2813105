//! Rankem Domain Layer
//!
//! This crate contains the core domain model for Rankem, a single-user tool for
//! ranking items through pairwise preference judgments. It depends only on
//! `uuid` and defines the value types, the rating engine and the trait
//! interfaces the storage and presentation layers build on.
//!
//! ## Key Concepts
//!
//! - **Rank**: A named, user-defined list of comparable items
//! - **Item**: An entry within a rank subject to pairwise judgments
//! - **Edge**: A directed `better_than` / `worse_than` assertion between two items
//! - **Score**: An Elo-style rating derived from the edges, used for sorting
//! - **Sorted flag**: Marks a rank whose scores reflect the latest computed pass
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the repository and persistence seams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod item;
pub mod rank;
pub mod rating;
pub mod traits;

// Re-exports for convenience
pub use id::{ItemId, RankId};
pub use item::{Item, DEFAULT_SCORE};
pub use rank::{Comparison, Preference, Rank};
pub use rating::RatingEngine;
