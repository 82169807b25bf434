//! Seed derivation and deterministic random streams.
//!
//! Everything downstream draws from a [`rand::Rng`]; this module provides the
//! string hash all seed-derived integers go through, the seeded streams built on it,
//! and the [`key::SeedKey`] that buckets wall-clock time into days.
use rand::Rng;

pub mod hash;
pub mod key;
pub mod stream;

pub use hash::string_hash;
pub use key::SeedKey;
pub use stream::{HashSequence, SeededStream};

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Draw a value in [0, 1) with full 32-bit resolution.
#[inline]
pub fn unit_f64(rng: &mut dyn Rng) -> f64 {
    rng.next_u32() as f64 / TWO_POW_32
}

/// Draw a value in [0, 1) for layout math.
///
/// Computed in `f64` and narrowed, then kept strictly below 1.0 since the
/// narrowing can round the largest draws up.
#[inline]
pub fn unit_f32(rng: &mut dyn Rng) -> f32 {
    let v = unit_f64(rng) as f32;
    if v >= 1.0 {
        1.0 - f32::EPSILON / 2.0
    } else {
        v
    }
}
