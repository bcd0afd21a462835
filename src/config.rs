//! # Table Configuration
//!
//! This module defines `TableConfig`, the knobs shared by every dictionary:
//! the bucket count a table starts with and the load factor past which it
//! doubles. Each collision strategy has its own default threshold because
//! they degrade at different fill levels.

use crate::dictionary::{DictionaryError, Result};

/// Bucket count used when none is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth threshold for separate chaining.
pub const CHAINING_MAX_LOAD_FACTOR: f64 = 1.0;

/// Growth threshold for linear probing; clusters lengthen probes quickly.
pub const PROBING_MAX_LOAD_FACTOR: f64 = 0.5;

/// Growth threshold for AVL buckets; a bucket lookup is logarithmic.
pub const AVL_MAX_LOAD_FACTOR: f64 = 1.0;

/// Sizing and growth settings for a dictionary.
///
/// A table grows (doubling its capacity and rehashing every live entry) when,
/// at the start of an insert, `len / capacity` is strictly greater than
/// `max_load_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front.
    pub initial_capacity: usize,

    /// Load factor that triggers a resize on the next insert.
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    /// Chaining defaults: 16 buckets, threshold 1.0.
    fn default() -> Self {
        Self::chaining()
    }
}

impl TableConfig {
    /// Defaults for `ChainingTable`.
    pub fn chaining() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: CHAINING_MAX_LOAD_FACTOR,
        }
    }

    /// Defaults for `ProbingTable`.
    pub fn probing() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: PROBING_MAX_LOAD_FACTOR,
        }
    }

    /// Defaults for `AvlChainedTable`.
    pub fn avl_chained() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: AVL_MAX_LOAD_FACTOR,
        }
    }

    /// Replaces the initial capacity.
    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Replaces the growth threshold.
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Checks that the configuration describes a usable table.
    ///
    /// # Returns
    /// `Err(DictionaryError::InvalidConfig)` for a zero capacity or a load
    /// factor that is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(DictionaryError::InvalidConfig(
                "initial capacity must be at least 1".to_string(),
            ));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(DictionaryError::InvalidConfig(format!(
                "max load factor must be a positive finite number, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }

    /// Whether a table holding `len` entries in `capacity` buckets must grow
    /// before accepting another insert.
    #[inline]
    pub(crate) fn needs_resize(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 > self.max_load_factor
    }
}
