//! The capability set shared by every hash table, the error type and the
//! closed set of collision strategies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::avl_chained::AvlChainedTable;
use crate::chaining::ChainingTable;
use crate::config::TableConfig;
use crate::probing::ProbingTable;
use crate::types::{Entry, Key, Value};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DictionaryError {
    /// Every slot of an open addressing table holds a live entry.
    #[error("table is full: all {capacity} slots hold live entries")]
    TableFull { capacity: usize },
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown collision strategy `{0}`")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

/// An integer-keyed associative container.
///
/// Keys are unique; inserting an existing key overwrites its value without
/// changing `len`. A missing key is not an error: lookups and removals return
/// `None`.
pub trait Dictionary: fmt::Display {
    /// Inserts or overwrites `key`.
    ///
    /// # Returns
    /// `Ok(None)` when the key is new, `Ok(Some(previous))` when an existing
    /// value was replaced, and `Err(DictionaryError::TableFull)` when an open
    /// addressing table has no slot left. A failed insert leaves the table
    /// unchanged.
    fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>>;

    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: Key) -> Option<Value>;

    /// Looks up the value stored for `key`.
    fn find(&self, key: Key) -> Option<Value>;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Number of buckets (or slots) currently allocated.
    fn capacity(&self) -> usize;

    /// Drops every entry; the capacity is kept.
    fn clear(&mut self);

    /// Visits every live entry once, in bucket order.
    fn for_each_entry(&self, visit: &mut dyn FnMut(Entry));

    /// Static label of the collision strategy.
    fn name(&self) -> &'static str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Human-readable dump of every bucket, with `[EMPTY]` for unused ones.
    fn display(&self) -> String {
        self.to_string()
    }
}

/// The collision strategies this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Chaining,
    Probing,
    AvlChained,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Chaining, Strategy::Probing, Strategy::AvlChained];

    /// The configuration a table of this strategy uses unless told otherwise.
    pub fn default_config(self) -> TableConfig {
        match self {
            Strategy::Chaining => TableConfig::chaining(),
            Strategy::Probing => TableConfig::probing(),
            Strategy::AvlChained => TableConfig::avl_chained(),
        }
    }

    /// Builds an empty table of this strategy behind the shared interface.
    pub fn build(self, config: TableConfig) -> Result<Box<dyn Dictionary>> {
        Ok(match self {
            Strategy::Chaining => Box::new(ChainingTable::with_config(config)?),
            Strategy::Probing => Box::new(ProbingTable::with_config(config)?),
            Strategy::AvlChained => Box::new(AvlChainedTable::with_config(config)?),
        })
    }

    /// Builds an empty table with the strategy's default load factor.
    ///
    /// A zero `capacity` is raised to one bucket.
    pub fn with_capacity(self, capacity: usize) -> Box<dyn Dictionary> {
        match self {
            Strategy::Chaining => Box::new(ChainingTable::new(capacity)),
            Strategy::Probing => Box::new(ProbingTable::new(capacity)),
            Strategy::AvlChained => Box::new(AvlChainedTable::new(capacity)),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Strategy::Chaining => "chaining",
            Strategy::Probing => "probing",
            Strategy::AvlChained => "avl",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chaining" | "chain" => Ok(Strategy::Chaining),
            "probing" | "open" | "open-addressing" | "linear" => Ok(Strategy::Probing),
            "avl" | "avl-chained" | "tree" => Ok(Strategy::AvlChained),
            _ => Err(DictionaryError::UnknownStrategy(s.to_string())),
        }
    }
}
