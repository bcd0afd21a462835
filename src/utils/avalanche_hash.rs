//! Bucket hashing for integer keys.
//!
//! Every table maps a key to a bucket through a [`BucketHasher`]. The default,
//! [`AvalancheHasher`], runs the key through two multiply/xor-shift rounds so
//! that sequential or otherwise structured key sets spread evenly across
//! buckets instead of piling into neighbouring ones.

use crate::types::Key;

/// Multiplier used by both mixing rounds.
pub const AVALANCHE_K: u32 = 0x045d_9f3b;

/// Mixes the bit pattern of `key` into a well-distributed 32-bit hash.
///
/// Negative keys are reinterpreted as their two's complement bit pattern, so
/// the function is total over `i32` and never takes a modulo of a negative
/// operand.
///
/// # Arguments
/// * `key` - The key to hash.
///
/// # Returns
/// A 32-bit hash value.
#[inline(always)]
pub fn avalanche_hash(key: Key) -> u32 {
    let mut u = key as u32;
    u = ((u >> 16) ^ u).wrapping_mul(AVALANCHE_K);
    u = ((u >> 16) ^ u).wrapping_mul(AVALANCHE_K);
    (u >> 16) ^ u
}

/// Maps `key` to a bucket index in `[0, capacity)`.
///
/// `capacity` must be non-zero; tables never hold an empty bucket array.
#[inline(always)]
pub fn bucket_index(key: Key, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    avalanche_hash(key) as usize % capacity
}

/// Strategy for turning a key into a bucket index.
///
/// Implementations must be deterministic and return a value below `capacity`.
pub trait BucketHasher {
    fn bucket(&self, key: Key, capacity: usize) -> usize;
}

/// The default hasher, backed by [`avalanche_hash`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvalancheHasher;

impl BucketHasher for AvalancheHasher {
    #[inline(always)]
    fn bucket(&self, key: Key, capacity: usize) -> usize {
        bucket_index(key, capacity)
    }
}

impl<F> BucketHasher for F
where
    F: Fn(Key, usize) -> usize,
{
    #[inline(always)]
    fn bucket(&self, key: Key, capacity: usize) -> usize {
        self(key, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hashes_to_zero() {
        assert_eq!(avalanche_hash(0), 0);
    }

    #[test]
    fn matches_reference_mix() {
        // 1 -> (1 * K) then second round then final shift
        let mut u: u32 = 1;
        u = ((u >> 16) ^ u).wrapping_mul(AVALANCHE_K);
        u = ((u >> 16) ^ u).wrapping_mul(AVALANCHE_K);
        u ^= u >> 16;
        assert_eq!(avalanche_hash(1), u);
    }

    #[test]
    fn negative_keys_stay_in_range() {
        for key in [-1, -2, i32::MIN, i32::MIN + 1, -123_456] {
            for capacity in [1, 2, 7, 16, 1000] {
                assert!(bucket_index(key, capacity) < capacity);
            }
        }
        assert_eq!(avalanche_hash(-1), avalanche_hash(-1));
        assert_ne!(avalanche_hash(-1), avalanche_hash(1));
    }

    #[test]
    fn sequential_keys_spread_over_buckets() {
        let capacity = 64;
        let mut counts = vec![0usize; capacity];
        for key in 0..(capacity as i32 * 16) {
            counts[bucket_index(key, capacity)] += 1;
        }
        let used = counts.iter().filter(|&&c| c > 0).count();
        assert_eq!(used, capacity);
        assert!(counts.iter().all(|&c| c < 16 * 3));
    }

    #[test]
    fn closures_act_as_hashers() {
        let constant = |_key: Key, _capacity: usize| 3usize;
        assert_eq!(constant.bucket(42, 8), 3);
        assert_eq!(AvalancheHasher.bucket(42, 8), bucket_index(42, 8));
    }
}
