//! # Utility Modules
//!
//! Leaf building blocks used by every dictionary and by the drivers that
//! exercise them: the bucket hash function and a reproducible random number
//! generator for key streams.

/// Bucket hashing for integer keys.
///
/// This module provides `avalanche_hash`, a two-round multiplicative mix, and
/// the `BucketHasher` trait the tables are generic over, so callers can swap
/// in a custom (or deliberately colliding) hash.
pub mod avalanche_hash;

/// A reproducible random number generator.
///
/// This module contains `KeyRng`, which combines the XOROSHIRO128+ algorithm
/// with Lemire's method for unbiased range generation, plus helpers for
/// generating and shuffling key streams.
pub mod random_generator;
