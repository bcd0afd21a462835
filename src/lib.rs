//! # hashdict
//!
//! Integer dictionaries built on three collision-resolution strategies that
//! share one interface, [`Dictionary`]:
//!
//! - [`ChainingTable`]: separate chaining with small inline buckets.
//! - [`ProbingTable`]: open addressing with linear probing and tombstones.
//! - [`AvlChainedTable`]: chaining where every bucket is an [`AvlTree`].
//!
//! ```rust
//! use hashdict::{Dictionary, Strategy};
//!
//! for strategy in Strategy::ALL {
//!     let mut table = strategy.with_capacity(8);
//!     table.insert(10, 100).unwrap();
//!     assert_eq!(table.find(10), Some(100));
//! }
//! ```
pub mod avl_chained;
pub mod avl_tree;
pub mod chaining;
pub mod config;
pub mod dictionary;
pub mod probing;
pub mod types;
pub mod utils;

#[cfg(feature = "node")]
pub mod node;

// Re-export main types
pub use avl_chained::AvlChainedTable;
pub use avl_tree::AvlTree;
pub use chaining::ChainingTable;
pub use config::TableConfig;
pub use dictionary::{Dictionary, DictionaryError, Result, Strategy};
pub use probing::{ProbingTable, Slot};
pub use types::{Entry, Key, Value};

// Re-export for custom hashing
pub use utils::avalanche_hash::{avalanche_hash, AvalancheHasher, BucketHasher};
