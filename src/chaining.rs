//! Separate chaining: every bucket is a short, unordered run of entries.

use std::fmt;

use log::debug;
use smallvec::SmallVec;

use crate::config::TableConfig;
use crate::dictionary::{Dictionary, Result};
use crate::types::{Entry, Key, Value};
use crate::utils::avalanche_hash::{AvalancheHasher, BucketHasher};

/// Entries kept inline before a bucket spills to the heap.
const INLINE_BUCKET_SIZE: usize = 4;

type ChainBucket = SmallVec<[Entry; INLINE_BUCKET_SIZE]>;

/// Hash table resolving collisions by chaining entries inside each bucket.
///
/// Inserts never fail: chains grow without bound, and the table doubles once
/// the load factor goes above the configured threshold (1.0 by default).
#[derive(Debug, Clone)]
pub struct ChainingTable<H = AvalancheHasher> {
    buckets: Vec<ChainBucket>,
    count: usize,
    config: TableConfig,
    hasher: H,
}

impl ChainingTable {
    /// Creates a table with `capacity` buckets (at least one).
    pub fn new(capacity: usize) -> Self {
        let config = TableConfig::chaining().with_capacity(capacity.max(1));
        Self::build(config, AvalancheHasher)
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_hasher(config, AvalancheHasher)
    }
}

impl Default for ChainingTable {
    fn default() -> Self {
        Self::build(TableConfig::chaining(), AvalancheHasher)
    }
}

impl<H: BucketHasher> ChainingTable<H> {
    /// Creates a table that places keys with `hasher`.
    pub fn with_hasher(config: TableConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: H) -> Self {
        Self {
            buckets: vec![ChainBucket::new(); config.initial_capacity],
            count: 0,
            config,
            hasher,
        }
    }

    #[inline(always)]
    fn bucket_for(&self, key: Key) -> usize {
        self.hasher.bucket(key, self.buckets.len())
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).max().unwrap_or(0)
    }

    /// Doubles the bucket array and rehashes every entry into it.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        debug!(
            "chaining table: growing {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_capacity,
            self.count
        );
        let old = std::mem::replace(&mut self.buckets, vec![ChainBucket::new(); new_capacity]);
        for entry in old.into_iter().flatten() {
            let idx = self.bucket_for(entry.key);
            self.buckets[idx].push(entry);
        }
    }
}

impl<H: BucketHasher> Dictionary for ChainingTable<H> {
    fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
        if self.config.needs_resize(self.count, self.buckets.len()) {
            self.resize();
        }

        let idx = self.bucket_for(key);
        let bucket = &mut self.buckets[idx];
        if let Some(entry) = bucket.iter_mut().find(|e| e.key == key) {
            return Ok(Some(std::mem::replace(&mut entry.value, value)));
        }
        bucket.push(Entry::new(key, value));
        self.count += 1;
        Ok(None)
    }

    fn remove(&mut self, key: Key) -> Option<Value> {
        let idx = self.bucket_for(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|e| e.key == key)?;
        let removed = bucket.swap_remove(pos);
        self.count -= 1;
        Some(removed.value)
    }

    fn find(&self, key: Key) -> Option<Value> {
        self.buckets[self.bucket_for(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.count = 0;
    }

    fn for_each_entry(&self, visit: &mut dyn FnMut(Entry)) {
        for entry in self.buckets.iter().flatten() {
            visit(*entry);
        }
    }

    fn name(&self) -> &'static str {
        "Chaining Hash Table"
    }
}

impl<H> fmt::Display for ChainingTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Chaining Hash Table ===")?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "Bucket {}: ", i)?;
            if bucket.is_empty() {
                write!(f, "[EMPTY]")?;
            }
            for (n, entry) in bucket.iter().enumerate() {
                if n > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", entry)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Size: {}", self.count)
    }
}
