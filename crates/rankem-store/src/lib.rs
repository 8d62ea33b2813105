//! Rankem Storage Layer
//!
//! Implements the `RankRepository` and `StateStore` traits from rankem-domain.
//!
//! # Architecture
//!
//! - [`Store`]: the in-memory preference graph. Mutations are atomic
//!   snapshot swaps, so readers never observe a half-applied change.
//! - [`SqliteStateStore`]: persists the full rank list as one versioned
//!   JSON record in SQLite.
//!
//! The two are independent. The composition root loads ranks from the
//! state store, hands them to a `Store`, and saves the snapshot back after
//! each mutation.
//!
//! # Examples
//!
//! ```
//! use rankem_domain::traits::{RankRepository, StateStore};
//! use rankem_store::{SqliteStateStore, Store};
//!
//! let mut persistence = SqliteStateStore::new(":memory:").unwrap();
//! let mut store = Store::from_ranks(persistence.load().unwrap());
//!
//! store.create_rank("Fruits").unwrap();
//! persistence.save(&store.snapshot().to_ranks()).unwrap();
//!
//! assert_eq!(persistence.load().unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

mod error;
pub mod records;
mod sqlite;
mod store;

pub use error::StoreError;
pub use sqlite::{SqliteStateStore, DEFAULT_NAMESPACE, SCHEMA_VERSION};
pub use store::{Store, StoreState};
