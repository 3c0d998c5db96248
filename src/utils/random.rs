// ABOUTME: Injectable, seedable randomness shared by every randomized choice
// ABOUTME: Wraps a StdRng behind a mutex so one source can serve concurrent requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Random selection source
//!
//! Appreciation replies, search phrasing and search-result picks all draw
//! from one [`RandomSource`]. Production code seeds it from OS entropy; tests
//! seed it with a fixed value so every candidate can be asserted over.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};

/// Thread-safe random source
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    /// Seed from operating system entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed deterministically
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Pick one element uniformly at random, `None` for an empty slice
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.choose(&mut *rng)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_empty_returns_none() {
        let source = RandomSource::seeded(7);
        let empty: [u8; 0] = [];
        assert!(source.choose(&empty).is_none());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let items = ["a", "b", "c", "d", "e"];
        let first = RandomSource::seeded(42);
        let second = RandomSource::seeded(42);
        for _ in 0..20 {
            assert_eq!(first.choose(&items), second.choose(&items));
        }
    }

    #[test]
    fn test_choose_always_returns_member() {
        let items = [10, 20, 30];
        let source = RandomSource::seeded(3);
        for _ in 0..100 {
            let picked = source.choose(&items).unwrap();
            assert!(items.contains(picked));
        }
    }
}
