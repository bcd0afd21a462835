//! Hash table whose buckets are AVL trees.
//!
//! Colliding keys are kept ordered inside their bucket's tree, so a bucket
//! lookup costs `O(log n)` in the bucket size instead of a linear scan.

use std::fmt;

use log::debug;

use crate::avl_tree::AvlTree;
use crate::config::TableConfig;
use crate::dictionary::{Dictionary, Result};
use crate::types::{Entry, Key, Value};
use crate::utils::avalanche_hash::{AvalancheHasher, BucketHasher};

/// Hash table resolving collisions with a balanced tree per bucket.
///
/// The table doubles once the load factor goes above the configured threshold
/// (1.0 by default). Inserts never fail.
#[derive(Debug, Clone)]
pub struct AvlChainedTable<H = AvalancheHasher> {
    buckets: Vec<AvlTree>,
    count: usize,
    config: TableConfig,
    hasher: H,
}

impl AvlChainedTable {
    /// Creates a table with `capacity` buckets (at least one).
    pub fn new(capacity: usize) -> Self {
        let config = TableConfig::avl_chained().with_capacity(capacity.max(1));
        Self::build(config, AvalancheHasher)
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_hasher(config, AvalancheHasher)
    }
}

impl Default for AvlChainedTable {
    fn default() -> Self {
        Self::build(TableConfig::avl_chained(), AvalancheHasher)
    }
}

impl<H: BucketHasher> AvlChainedTable<H> {
    /// Creates a table that places keys with `hasher`.
    pub fn with_hasher(config: TableConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: H) -> Self {
        Self {
            buckets: vec![AvlTree::new(); config.initial_capacity],
            count: 0,
            config,
            hasher,
        }
    }

    #[inline(always)]
    fn bucket_for(&self, key: Key) -> usize {
        self.hasher.bucket(key, self.buckets.len())
    }

    /// The tree stored in bucket `index`, if in range.
    pub fn bucket(&self, index: usize) -> Option<&AvlTree> {
        self.buckets.get(index)
    }

    /// Height of the tallest bucket tree.
    pub fn max_bucket_height(&self) -> usize {
        self.buckets.iter().map(AvlTree::height).max().unwrap_or(0)
    }

    /// Doubles the bucket array and reinserts every entry of every old tree.
    ///
    /// Each old tree is torn down once its entries have been moved out.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        debug!(
            "avl table: growing {} -> {} buckets ({} entries, tallest bucket {})",
            self.buckets.len(),
            new_capacity,
            self.count,
            self.max_bucket_height()
        );
        let old = std::mem::replace(&mut self.buckets, vec![AvlTree::new(); new_capacity]);
        for tree in old {
            for entry in tree.into_entries() {
                let idx = self.bucket_for(entry.key);
                self.buckets[idx].insert(entry.key, entry.value);
            }
        }
    }
}

impl<H: BucketHasher> Dictionary for AvlChainedTable<H> {
    fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
        if self.config.needs_resize(self.count, self.buckets.len()) {
            self.resize();
        }

        let idx = self.bucket_for(key);
        let previous = self.buckets[idx].insert(key, value);
        if previous.is_none() {
            self.count += 1;
        }
        Ok(previous)
    }

    fn remove(&mut self, key: Key) -> Option<Value> {
        let idx = self.bucket_for(key);
        let removed = self.buckets[idx].remove(key);
        if removed.is_some() {
            self.count -= 1;
        }
        removed
    }

    fn find(&self, key: Key) -> Option<Value> {
        self.buckets[self.bucket_for(key)].get(key)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        for tree in self.buckets.iter_mut() {
            tree.clear();
        }
        self.count = 0;
    }

    fn for_each_entry(&self, visit: &mut dyn FnMut(Entry)) {
        for entry in self.buckets.iter().flat_map(AvlTree::iter) {
            visit(entry);
        }
    }

    fn name(&self) -> &'static str {
        "AVL Hash Table"
    }
}

impl<H> fmt::Display for AvlChainedTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== AVL Hash Table ===")?;
        for (i, tree) in self.buckets.iter().enumerate() {
            writeln!(f, "Bucket {}:", i)?;
            if tree.is_empty() {
                writeln!(f, "  [EMPTY]")?;
            } else {
                tree.write_indented(f, 1)?;
            }
        }
        writeln!(f, "Size: {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_entries<H: BucketHasher>(table: &AvlChainedTable<H>) -> usize {
        table.buckets.iter().map(AvlTree::len).sum()
    }

    #[test]
    fn colliding_keys_form_a_balanced_tree() {
        let config = TableConfig::avl_chained().with_capacity(8);
        let mut table =
            AvlChainedTable::with_hasher(config, |_k: Key, _c: usize| 5usize).unwrap();
        for key in 1..=7 {
            table.insert(key, key * 100).unwrap();
        }
        let bucket = table.bucket(5).unwrap();
        assert_eq!(bucket.len(), 7);
        assert_eq!(bucket.height(), 3);
        assert_eq!(table.max_bucket_height(), 3);
    }

    #[test]
    fn resize_moves_every_entry() {
        let mut table = AvlChainedTable::new(2);
        for key in -20..20 {
            table.insert(key, key * 3).unwrap();
        }
        assert!(table.capacity() >= 32);
        assert_eq!(table.len(), 40);
        assert_eq!(tree_entries(&table), 40);
        for key in -20..20 {
            assert_eq!(table.find(key), Some(key * 3));
        }
    }

    #[test]
    fn remove_updates_size_only_when_found() {
        let mut table = AvlChainedTable::new(4);
        table.insert(1, 1).unwrap();
        assert_eq!(table.remove(2), None);
        assert_eq!(table.len(), 1);
        assert_eq!(table.remove(1), Some(1));
        assert!(table.is_empty());
        assert_eq!(tree_entries(&table), 0);
    }

    #[test]
    fn display_renders_trees_and_empty_buckets() {
        let config = TableConfig::avl_chained().with_capacity(2);
        let mut table =
            AvlChainedTable::with_hasher(config, |_k: Key, _c: usize| 1usize).unwrap();
        for key in [2, 1, 3] {
            table.insert(key, key * 10).unwrap();
        }
        let text = table.to_string();
        assert_eq!(
            text,
            "=== AVL Hash Table ===\n\
             Bucket 0:\n  [EMPTY]\n\
             Bucket 1:\n    (3,30)\n  (2,20)\n    (1,10)\n\
             Size: 3\n"
        );
    }
}
