//! Deterministic random streams derived from a seed string.
//!
//! - [`SeededStream`]: Mulberry32 mixer seeded from [`string_hash`]; the default source.
//! - [`HashSequence`]: index-addressed sequence where draw `i` is
//!   `(string_hash(seed + "-" + i) mod 1000) / 1000`. Coarse and strongly correlated
//!   between neighbouring indices, kept for layouts that were tuned against it.
//!
//! Both implement [`Rng`], so they plug into anything that takes an RNG.
use std::convert::Infallible;

use rand::{Rng, TryRng};

use crate::seed::hash::string_hash;

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const SEQUENCE_RESOLUTION: u32 = 1000;

/// Mulberry32 stream. Two streams built from the same seed yield bit-identical draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStream {
    state: u32,
}

impl SeededStream {
    /// Create a stream whose state is initialised from `string_hash(seed)`.
    pub fn new(seed: &str) -> Self {
        Self::from_state(string_hash(seed))
    }

    /// Create a stream from a raw 32-bit state.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state. Restoring it with [`SeededStream::from_state`] resumes the stream.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next draw normalised to [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        crate::seed::unit_f64(self)
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }
}

impl TryRng for SeededStream {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Infallible> {
        Ok({
            self.step()
        })
    }

    fn try_next_u64(&mut self) -> Result<u64, Infallible> {
        Ok({
            let hi = self.step() as u64;
            let lo = self.step() as u64;
            (hi << 32) | lo
        })
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
        Ok({
            for chunk in dest.chunks_mut(4) {
                let bytes = self.step().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        })
    }
}

/// Index-addressed pseudo-random sequence over a seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashSequence {
    seed: String,
    index: u64,
}

impl HashSequence {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            index: 0,
        }
    }

    /// The value at `index`, in thousandths: one of `0.000, 0.001, ..., 0.999`.
    pub fn value_at(&self, index: u64) -> f64 {
        self.raw_at(index) as f64 / SEQUENCE_RESOLUTION as f64
    }

    /// Index of the next draw.
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Materialise the first `count` values.
    pub fn take_values(&self, count: usize) -> Vec<f64> {
        (0..count as u64).map(|i| self.value_at(i)).collect()
    }

    fn raw_at(&self, index: u64) -> u32 {
        string_hash(&format!("{}-{}", self.seed, index)) % SEQUENCE_RESOLUTION
    }
}

impl TryRng for HashSequence {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Infallible> {
        Ok({
            let raw = self.raw_at(self.index) as u64;
            self.index += 1;
            // Scale thousandths onto the u32 range so unit draws land on raw / 1000.
            ((raw << 32) / SEQUENCE_RESOLUTION as u64) as u32
        })
    }

    fn try_next_u64(&mut self) -> Result<u64, Infallible> {
        Ok({
            ((self.next_u32() as u64) << 32) | self.next_u32() as u64
        })
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
        Ok({
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        })
    }
}
