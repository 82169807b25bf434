//! Deterministic selection over a seed string.
//!
//! - [daily_index]: `string_hash(seed) mod modulus`, stable for the life of the seed.
//! - [deterministic_shuffle] / [shuffle_with]: Fisher–Yates driven by sequential stream draws.
//! - [deterministic_subset]: the first `k` of the shuffle.
//! - [rank_by_hash]: order by `string_hash(prefix + id)`, independent of input order
//!   except for ties.
//!
//! Shuffle consumes a [crate::seed::SeededStream] draw per swap; ranking consumes none,
//! so adding an item to a ranked list never disturbs the relative order of the others.
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::seed::hash::string_hash_concat;
use crate::seed::{string_hash, unit_f64, SeededStream};

/// Items that carry a stable string identifier.
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for String {
    fn id(&self) -> &str {
        self
    }
}

impl HasId for &str {
    fn id(&self) -> &str {
        self
    }
}

pub fn daily_index(seed: &str, modulus: u32) -> Result<u32> {
    if modulus == 0 {
        return Err(Error::InvalidArgument("modulus must be > 0".into()));
    }
    let index = string_hash(seed) % modulus;
    debug!("Daily index for '{}' mod {}: {}.", seed, modulus, index);
    Ok(index)
}

/// Shuffle a copy of `items` with a fresh stream seeded from `seed`.
pub fn deterministic_shuffle<T: Clone>(seed: &str, items: &[T]) -> Vec<T> {
    let mut stream = SeededStream::new(seed);
    shuffle_with(&mut stream, items)
}

/// Shuffle a copy of `items` with draws taken from `rng`.
///
/// Walks from the last index down, swapping `i` with `floor(u * (i + 1))`.
pub fn shuffle_with<T: Clone>(rng: &mut dyn Rng, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = ((unit_f64(rng) * (i + 1) as f64) as usize).min(i);
        out.swap(i, j);
    }
    out
}

/// The first `min(k, items.len())` elements of [deterministic_shuffle].
pub fn deterministic_subset<T: Clone>(seed: &str, items: &[T], k: i64) -> Result<Vec<T>> {
    if k < 0 {
        return Err(Error::InvalidArgument(format!(
            "subset size must be >= 0, got {k}"
        )));
    }
    let mut shuffled = deterministic_shuffle(seed, items);
    shuffled.truncate(usize::try_from(k).unwrap_or(usize::MAX));
    Ok(shuffled)
}

/// Sort a copy of `items` ascending by `string_hash(prefix + item.id())`.
pub fn rank_by_hash<T: HasId + Clone>(prefix: &str, items: &[T]) -> Vec<T> {
    let mut keyed: Vec<(u32, &T)> = items
        .iter()
        .map(|item| (string_hash_concat(prefix, item.id()), item))
        .collect();
    keyed.sort_by_key(|(hash, _)| *hash);
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}
