// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Random sources

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Source of randomness for token generation
pub trait RandomSource: Send {
    /// Uniform float in `[0, 1)`; need not be cryptographically strong
    fn next_f64(&mut self) -> f64;

    /// Fill `buf` with bytes from a cryptographically strong source
    fn fill_bytes(&mut self, buf: &mut [u8]);
}

/// Thread RNG for floats, operating system RNG for bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}

/// Deterministic source for tests and benchmarks.
///
/// Not suitable for real tokens.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}
