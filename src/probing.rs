//! Open addressing with linear probing.
//!
//! Each slot holds at most one entry. Removal leaves a tombstone so that
//! later probes keep walking past it; tombstones are only dropped when the
//! slot array is rebuilt, either by a resize or by an in-place purge once no
//! empty slot is left.

use std::fmt;

use log::{debug, trace, warn};

use crate::config::TableConfig;
use crate::dictionary::{Dictionary, DictionaryError, Result};
use crate::types::{Entry, Key, Value};
use crate::utils::avalanche_hash::{AvalancheHasher, BucketHasher};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    Tombstone,
}

/// Where a probe sequence for a key ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is the first empty slot of its sequence.
    Vacant(usize),
    /// A full cycle visited no empty slot and no matching key.
    Exhausted,
}

/// Hash table resolving collisions by linear probing.
///
/// The table doubles once the load factor goes above the configured threshold
/// (0.5 by default). An insert only fails, with
/// [`DictionaryError::TableFull`], when every slot holds a live entry, which
/// requires a threshold of 1.0 or more.
#[derive(Debug, Clone)]
pub struct ProbingTable<H = AvalancheHasher> {
    slots: Vec<Slot>,
    count: usize,
    tombstones: usize,
    config: TableConfig,
    hasher: H,
}

impl ProbingTable {
    /// Creates a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        let config = TableConfig::probing().with_capacity(capacity.max(1));
        Self::build(config, AvalancheHasher)
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_hasher(config, AvalancheHasher)
    }
}

impl Default for ProbingTable {
    fn default() -> Self {
        Self::build(TableConfig::probing(), AvalancheHasher)
    }
}

impl<H: BucketHasher> ProbingTable<H> {
    /// Creates a table that places keys with `hasher`.
    pub fn with_hasher(config: TableConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: H) -> Self {
        Self {
            slots: vec![Slot::Empty; config.initial_capacity],
            count: 0,
            tombstones: 0,
            config,
            hasher,
        }
    }

    /// Number of slots marked deleted since the last rebuild.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// The slot at `index`, if in range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Walks the probe sequence of `key`, skipping tombstones and foreign keys.
    fn probe(&self, key: Key) -> Probe {
        let capacity = self.slots.len();
        let start = self.hasher.bucket(key, capacity);
        let mut index = start;
        loop {
            match self.slots[index] {
                Slot::Empty => return Probe::Vacant(index),
                Slot::Occupied(entry) if entry.key == key => return Probe::Found(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
            index = (index + 1) % capacity;
            if index == start {
                return Probe::Exhausted;
            }
        }
    }

    /// Doubles the slot array.
    fn resize(&mut self) {
        self.rehash(self.slots.len() * 2);
    }

    /// Rebuilds the slot array at `new_capacity`, re-placing every live entry.
    ///
    /// Tombstones are not carried over.
    fn rehash(&mut self, new_capacity: usize) {
        debug!(
            "probing table: rebuilding {} -> {} slots ({} entries, {} tombstones dropped)",
            self.slots.len(),
            new_capacity,
            self.count,
            self.tombstones
        );
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; new_capacity]);
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                // Live entries are fewer than the slots, so an empty one exists.
                match self.probe(entry.key) {
                    Probe::Vacant(index) => self.slots[index] = Slot::Occupied(entry),
                    Probe::Found(_) | Probe::Exhausted => {
                        unreachable!("rehash found no empty slot for key {}", entry.key)
                    }
                }
            }
        }
    }
}

impl<H: BucketHasher> Dictionary for ProbingTable<H> {
    fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
        if self.config.needs_resize(self.count, self.slots.len()) {
            self.resize();
        }

        let mut probe = self.probe(key);
        if probe == Probe::Exhausted && self.tombstones > 0 {
            trace!(
                "probing table: no empty slot left for key {}, purging {} tombstones",
                key,
                self.tombstones
            );
            // The load check above already passed, so rebuild in place.
            self.rehash(self.slots.len());
            probe = self.probe(key);
        }

        match probe {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(entry) => Ok(Some(std::mem::replace(&mut entry.value, value))),
                _ => unreachable!("probe reported a match on a non-occupied slot"),
            },
            Probe::Vacant(index) => {
                self.slots[index] = Slot::Occupied(Entry::new(key, value));
                self.count += 1;
                Ok(None)
            }
            Probe::Exhausted => {
                warn!(
                    "probing table: all {} slots are live, rejecting key {}",
                    self.slots.len(),
                    key
                );
                Err(DictionaryError::TableFull {
                    capacity: self.slots.len(),
                })
            }
        }
    }

    fn remove(&mut self, key: Key) -> Option<Value> {
        let Probe::Found(index) = self.probe(key) else {
            return None;
        };
        let removed = std::mem::replace(&mut self.slots[index], Slot::Tombstone);
        self.count -= 1;
        self.tombstones += 1;
        match removed {
            Slot::Occupied(entry) => Some(entry.value),
            _ => None,
        }
    }

    fn find(&self, key: Key) -> Option<Value> {
        match self.probe(key) {
            Probe::Found(index) => match self.slots[index] {
                Slot::Occupied(entry) => Some(entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.count = 0;
        self.tombstones = 0;
    }

    fn for_each_entry(&self, visit: &mut dyn FnMut(Entry)) {
        for slot in &self.slots {
            if let Slot::Occupied(entry) = slot {
                visit(*entry);
            }
        }
    }

    fn name(&self) -> &'static str {
        "Open Addressing Hash Table"
    }
}

impl<H> fmt::Display for ProbingTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Open Addressing Hash Table ===")?;
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Occupied(entry) => writeln!(f, "Index {}: {}", i, entry)?,
                Slot::Tombstone => writeln!(f, "Index {}: [DELETED]", i)?,
                Slot::Empty => writeln!(f, "Index {}: [EMPTY]", i)?,
            }
        }
        writeln!(f, "Size: {}/{}", self.count, self.slots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_bucket(_key: Key, _capacity: usize) -> usize {
        1
    }

    fn occupied(table: &ProbingTable<impl BucketHasher>) -> usize {
        table
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count()
    }

    #[test]
    fn collisions_land_in_consecutive_slots() {
        let config = TableConfig::probing().with_capacity(4);
        let mut table = ProbingTable::with_hasher(config, same_bucket).unwrap();
        table.insert(7, 70).unwrap();
        table.insert(8, 80).unwrap();
        table.insert(9, 90).unwrap();
        assert_eq!(table.slot(1), Some(&Slot::Occupied(Entry::new(7, 70))));
        assert_eq!(table.slot(2), Some(&Slot::Occupied(Entry::new(8, 80))));
        assert_eq!(table.slot(3), Some(&Slot::Occupied(Entry::new(9, 90))));
        assert_eq!(table.capacity(), 4);

        // 3/4 is above 0.5, so this insert rebuilds first
        table.insert(10, 100).unwrap();
        assert_eq!(table.capacity(), 8);
        for (key, value) in [(7, 70), (8, 80), (9, 90), (10, 100)] {
            assert_eq!(table.find(key), Some(value));
        }
    }

    #[test]
    fn collisions_wrap_around_the_end() {
        let config = TableConfig::probing().with_capacity(4);
        let mut table =
            ProbingTable::with_hasher(config, |_k: Key, _c: usize| 3usize).unwrap();
        table.insert(1, 1).unwrap();
        table.insert(2, 2).unwrap();
        assert_eq!(table.slot(3), Some(&Slot::Occupied(Entry::new(1, 1))));
        assert_eq!(table.slot(0), Some(&Slot::Occupied(Entry::new(2, 2))));
    }

    #[test]
    fn tombstones_keep_probe_chains_intact() {
        let config = TableConfig::probing().with_capacity(8);
        let mut table = ProbingTable::with_hasher(config, same_bucket).unwrap();
        for key in 1..=3 {
            table.insert(key, key * 10).unwrap();
        }
        assert_eq!(table.remove(2), Some(20));
        assert_eq!(table.slot(2), Some(&Slot::Tombstone));
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.find(3), Some(30));
        assert_eq!(table.find(2), None);
        assert_eq!(table.remove(2), None);
        assert_eq!(table.len(), 2);
        assert!(table.to_string().contains("Index 2: [DELETED]\n"));
    }

    #[test]
    fn resize_drops_tombstones() {
        let mut table = ProbingTable::new(4);
        table.insert(1, 1).unwrap();
        table.insert(2, 2).unwrap();
        table.remove(1);
        table.insert(3, 3).unwrap();
        table.insert(4, 4).unwrap();
        assert_eq!(table.tombstones(), 1);
        // 3/4 > 0.5
        table.insert(5, 5).unwrap();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(occupied(&table), table.len());
    }

    #[test]
    fn full_table_rejects_foreign_keys_without_overwriting() {
        let config = TableConfig::probing()
            .with_capacity(2)
            .with_max_load_factor(1.0);
        let mut table = ProbingTable::with_config(config).unwrap();
        table.insert(10, 1).unwrap();
        table.insert(20, 2).unwrap();
        assert_eq!(
            table.insert(30, 3),
            Err(DictionaryError::TableFull { capacity: 2 })
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(10), Some(1));
        assert_eq!(table.find(20), Some(2));
        assert_eq!(table.find(30), None);
        // Existing keys can still be overwritten
        assert_eq!(table.insert(20, 22), Ok(Some(2)));
    }

    #[test]
    fn exhausted_slots_with_tombstones_rebuild_in_place() {
        let config = TableConfig::probing()
            .with_capacity(4)
            .with_max_load_factor(1.0);
        let mut table = ProbingTable::with_config(config).unwrap();
        // Churn through distinct keys until no slot is empty.
        for key in 0..4 {
            table.insert(key, key).unwrap();
            table.remove(key);
        }
        assert_eq!(table.tombstones(), 4);
        assert_eq!(table.insert(100, 1), Ok(None));
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.find(100), Some(1));
    }

    #[test]
    fn churn_over_distinct_keys_keeps_capacity_bounded() {
        let mut table = ProbingTable::new(16);
        for key in 0..100_000 {
            assert_eq!(table.insert(key, key), Ok(None));
            assert_eq!(table.remove(key), Some(key));
        }
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 16);
        assert_eq!(occupied(&table), 0);
    }

    #[test]
    fn purge_keeps_live_entries_when_rebuilding_in_place() {
        let mut table = ProbingTable::new(16);
        for key in 0..7 {
            table.insert(key, key * 10).unwrap();
        }
        for key in 1_000..21_000 {
            table.insert(key, 0).unwrap();
            table.remove(key);
        }
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 7);
        assert_eq!(occupied(&table), 7);
        for key in 0..7 {
            assert_eq!(table.find(key), Some(key * 10));
        }
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut table = ProbingTable::new(8);
        for key in 0..3 {
            table.insert(key, key).unwrap();
        }
        table.remove(1);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.tombstones(), 0);
        assert!(table.slots.iter().all(|s| *s == Slot::Empty));
    }
}
