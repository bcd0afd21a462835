//! # KeyRng: deterministic key streams for tests, demos and benchmarks
//!
//! This module provides `KeyRng`, a small and fast random number generator that
//! combines the XOROSHIRO128+ algorithm for raw bits with Lemire's method for
//! unbiased range generation. The generator is fully determined by its seed, so
//! a failing stress run can be replayed exactly.
//!
//! ## Key Features
//! - **Reproducible**: the same seed always yields the same key stream.
//! - **Unbiased Range Generation**: Lemire's multiply-and-shift with rejection.
//! - **Key helpers**: ready-made key/value vectors and in-place shuffling, the
//!   shapes the benchmark and stress drivers consume.

use crate::types::{Key, Value};

/// Golden-ratio increment used by the SplitMix64 seed expansion.
const SEED_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Expands one seed word into a well-mixed state word (SplitMix64 finaliser).
#[inline(always)]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(SEED_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// A reproducible random number generator with a dual-state design.
///
/// # Example
/// ```rust
/// use hashdict::utils::random_generator::KeyRng;
/// let mut rng = KeyRng::new(42);
/// let value = rng.range(1, 100);
/// assert!((1..=100).contains(&value));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct KeyRng {
    /// The primary state variable of the XOROSHIRO128+ algorithm.
    state_a: u64,
    /// The secondary state variable of the XOROSHIRO128+ algorithm.
    state_b: u64,
}

impl KeyRng {
    /// Creates a new `KeyRng` seeded with the given value.
    ///
    /// The seed is expanded through SplitMix64 so that the two state words are
    /// distinct and never both zero.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state_a = splitmix64(&mut s);
        let mut state_b = splitmix64(&mut s);
        if state_a == 0 && state_b == 0 {
            state_b = SEED_GAMMA;
        }
        Self { state_a, state_b }
    }

    /// Generates the next raw 64-bit random number (XOROSHIRO128+).
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state_a;
        let mut s1 = self.state_b;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state_a = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state_b = s1.rotate_left(37);

        result
    }

    /// Generates an unbiased number in `[0, range)` using Lemire's method.
    #[inline(always)]
    fn below(&mut self, range: u64) -> u64 {
        if range <= 1 {
            return 0;
        }
        if range.is_power_of_two() {
            return self.next_u64() & (range - 1);
        }

        let mut random = self.next_u64();
        let mut multiresult = (random as u128) * (range as u128);
        let mut leftover = multiresult as u64;

        if leftover < range {
            let threshold = (0u64.wrapping_sub(range)) % range;
            while leftover < threshold {
                random = self.next_u64();
                multiresult = (random as u128) * (range as u128);
                leftover = multiresult as u64;
            }
        }

        (multiresult >> 64) as u64
    }

    /// Generates a random number in the inclusive range `[min, max]`.
    ///
    /// Returns `min` when `min >= max`.
    pub fn range(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        match (max - min).checked_add(1) {
            Some(span) => min + self.below(span),
            // Full u64 span
            None => self.next_u64(),
        }
    }

    /// Generates a random `i32` in the inclusive range `[min, max]`.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64) as u64;
        (min as i64 + self.range(0, span) as i64) as i32
    }

    /// Shuffles `items` in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range(0, i as u64) as usize;
            items.swap(i, j);
        }
    }

    /// Draws `count` keys uniformly from `[min, max]`; duplicates are possible.
    pub fn keys(&mut self, count: usize, min: Key, max: Key) -> Vec<Key> {
        (0..count).map(|_| self.range_i32(min, max)).collect()
    }

    /// Draws `count` key/value pairs, keys from `[min, max]` and values from
    /// `[1, 1000]`.
    pub fn pairs(&mut self, count: usize, min: Key, max: Key) -> Vec<(Key, Value)> {
        (0..count)
            .map(|_| (self.range_i32(min, max), self.range_i32(1, 1000)))
            .collect()
    }
}
