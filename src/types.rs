//! Core types shared by every dictionary.

use std::fmt;

/// Key stored in a dictionary.
pub type Key = i32;

/// Value associated with a key.
pub type Value = i32;

/// A live key/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Entry {
    pub key: Key,
    pub value: Value,
}

impl Entry {
    #[inline]
    pub fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }
}

impl From<(Key, Value)> for Entry {
    #[inline]
    fn from((key, value): (Key, Value)) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.key, self.value)
    }
}
