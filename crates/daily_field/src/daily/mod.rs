//! Date-keyed content selection.
//!
//! [`Daily`] binds one [`SeedKey`] and derives every selection of the day from it:
//! the hexagram, its vocabulary mode and words, the featured, resonant and
//! suggested items, and the label items handed to the layout engine.
pub mod content;
pub mod hexagram;
pub mod vocabulary;

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::daily::content::CatalogItem;
use crate::daily::hexagram::HEXAGRAM_COUNT;
use crate::daily::vocabulary::{
    mode_for_hexagram, VocabularyMode, WordSelection, VOCABULARY_MODES,
};
use crate::error::Result;
use crate::layout::LabelItem;
use crate::seed::{HashSequence, SeedKey, SeededStream};
use crate::selection::{daily_index, rank_by_hash, HasId};

/// Items featured per day on the site.
pub const FEATURED_COUNT: usize = 8;
/// Words shown in the vocabulary cloud.
pub const WORD_COUNT: usize = 8;
/// Words accented in the vocabulary cloud.
pub const HIGHLIGHT_COUNT: usize = 2;

/// All selections for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Daily {
    key: SeedKey,
}

impl Daily {
    pub fn for_key(key: SeedKey) -> Self {
        Self { key }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_key(SeedKey::for_date(date))
    }

    /// Selections for the current UTC date.
    pub fn today() -> Self {
        Self::for_key(SeedKey::today())
    }

    pub fn key(&self) -> &SeedKey {
        &self.key
    }

    /// Hexagram of the day in 1..=64.
    pub fn hexagram_number(&self) -> u8 {
        // Same value as `daily_index(key, 64) + 1`, without the fallible modulus check.
        (self.key.seed_hash() % u32::from(HEXAGRAM_COUNT)) as u8 + 1
    }

    pub fn vocabulary_mode(&self) -> &'static VocabularyMode {
        // hexagram_number is always in 1..=64, so the lookup cannot fail.
        mode_for_hexagram(self.hexagram_number()).unwrap_or(&VOCABULARY_MODES[0])
    }

    /// Shuffled words of the day's mode with a few accented.
    pub fn daily_words(&self, count: usize, highlights: usize) -> WordSelection {
        let mode = self.vocabulary_mode();
        let selection = mode.select(&mut self.stream("words"), count, highlights);
        debug!(
            "Daily words for {} ({}): {:?}.",
            self.key, mode.name, selection.words
        );
        selection
    }

    /// First `count` items ranked by `hash(key + id)`.
    pub fn featured<T: HasId + Clone>(&self, items: &[T], count: usize) -> Vec<T> {
        let mut ranked = rank_by_hash(self.key.as_str(), items);
        ranked.truncate(count);
        ranked
    }

    pub fn featured_ids<T: HasId + Clone>(&self, items: &[T], count: usize) -> HashSet<String> {
        self.featured(items, count)
            .iter()
            .map(|item| item.id().to_owned())
            .collect()
    }

    /// Items that echo the day's hexagram, ranked under `"{key}-resonant-{hexagram}"`.
    pub fn resonant<T: HasId + Clone>(&self, items: &[T], count: usize) -> Vec<T> {
        let prefix = self
            .key
            .with_purpose(format_args!("resonant-{}", self.hexagram_number()));
        let mut ranked = rank_by_hash(prefix.as_str(), items);
        ranked.truncate(count);
        ranked
    }

    /// Slot to suggest as the first click, in `0..slots`.
    pub fn suggested_index(&self, slots: u32) -> Result<u32> {
        daily_index(self.key.with_purpose("suggested").as_str(), slots)
    }

    /// Independent stream for one use of the day, seeded by `"{key}-{purpose}"`.
    pub fn stream(&self, purpose: &str) -> SeededStream {
        self.key.with_purpose(purpose).stream()
    }

    /// Stateless per-index values `hash("{key}-{i}") % 1000 / 1000`.
    pub fn hash_sequence(&self) -> HashSequence {
        HashSequence::new(self.key.as_str())
    }

    /// Every item as a label; the first `featured_count` ranked items get priority.
    pub fn label_items(&self, items: &[CatalogItem], featured_count: usize) -> Vec<LabelItem> {
        let featured = self.featured_ids(items, featured_count);
        items
            .iter()
            .map(|item| {
                LabelItem::new(item.id.clone(), item.title.clone())
                    .with_priority(featured.contains(&item.id))
            })
            .collect()
    }
}

impl From<SeedKey> for Daily {
    fn from(key: SeedKey) -> Self {
        Self::for_key(key)
    }
}
