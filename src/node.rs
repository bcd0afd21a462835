//! Node.js bindings (feature `node`).
//!
//! Exposes every strategy through a single `Dictionary` class so a JavaScript
//! benchmark or demo driver can construct a table by name and drive it.

use napi::{Error, Result};
use napi_derive::napi;

use crate::config::DEFAULT_CAPACITY;
use crate::dictionary::{Dictionary, DictionaryError, Strategy};

fn to_napi(err: DictionaryError) -> Error {
    Error::from_reason(err.to_string())
}

/// Entry count as a JS `u32`, or `None` if it does not fit.
fn js_size(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

#[napi(js_name = "Dictionary")]
pub struct JsDictionary {
    inner: Box<dyn Dictionary>,
}

#[napi]
impl JsDictionary {
    /// `new Dictionary("avl", 8)`; the strategy is one of `chaining`,
    /// `probing` or `avl`.
    #[napi(constructor)]
    pub fn new(strategy: String, capacity: Option<u32>) -> Result<Self> {
        let strategy: Strategy = strategy.parse().map_err(to_napi)?;
        let capacity = capacity.map_or(DEFAULT_CAPACITY, |c| c as usize);
        let inner = strategy
            .build(strategy.default_config().with_capacity(capacity))
            .map_err(to_napi)?;
        Ok(Self { inner })
    }

    /// Returns `true`; throws when an open addressing table is full.
    #[napi]
    pub fn insert(&mut self, key: i32, value: i32) -> Result<bool> {
        self.inner.insert(key, value).map(|_| true).map_err(to_napi)
    }

    #[napi]
    pub fn remove(&mut self, key: i32) -> bool {
        self.inner.remove(key).is_some()
    }

    #[napi]
    pub fn find(&self, key: i32) -> Option<i32> {
        self.inner.find(key)
    }

    #[napi]
    pub fn size(&self) -> Result<u32> {
        let len = self.inner.len();
        js_size(len).ok_or_else(|| Error::from_reason(format!("size {} does not fit in u32", len)))
    }

    #[napi]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[napi]
    pub fn display(&self) -> String {
        self.inner.display()
    }

    #[napi(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_size_passes_small_counts_through() {
        assert_eq!(js_size(0), Some(0));
        assert_eq!(js_size(u32::MAX as usize), Some(u32::MAX));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn js_size_rejects_counts_above_u32() {
        assert_eq!(js_size(u32::MAX as usize + 1), None);
    }
}
