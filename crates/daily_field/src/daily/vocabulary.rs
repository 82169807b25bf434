//! Vocabulary modes: eight themed word sets, one per day via the hexagram number.
use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{Error, Result};
use crate::seed::unit_f64;
use crate::selection::shuffle_with;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyMode {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

pub static VOCABULARY_MODES: [VocabularyMode; 8] = [
    VocabularyMode {
        name: "STRUCTURE",
        words: &[
            "structure",
            "protocol",
            "coordination",
            "logistics",
            "constraint",
            "system",
            "governance",
            "infrastructure",
        ],
    },
    VocabularyMode {
        name: "MEDIATION",
        words: &[
            "mediation",
            "interface",
            "translation",
            "signal",
            "inscription",
            "abstraction",
            "framing",
            "articulation",
        ],
    },
    VocabularyMode {
        name: "INTERIORITY",
        words: &[
            "interiority",
            "attention",
            "memory",
            "perception",
            "cognition",
            "affect",
            "trace",
            "subject",
        ],
    },
    VocabularyMode {
        name: "ARCHIVE",
        words: &[
            "archive",
            "document",
            "index",
            "residue",
            "annotation",
            "record",
            "retrieval",
            "provenance",
        ],
    },
    VocabularyMode {
        name: "PREDICTION",
        words: &[
            "prediction",
            "forecast",
            "optimisation",
            "probability",
            "control",
            "feedback",
            "automation",
            "anticipation",
        ],
    },
    VocabularyMode {
        name: "PUBLIC LIFE",
        words: &[
            "public space",
            "infrastructure",
            "commons",
            "access",
            "governance",
            "circulation",
            "enclosure",
            "participation",
        ],
    },
    VocabularyMode {
        name: "FRAGMENTATION",
        words: &[
            "fragmentation",
            "rupture",
            "drift",
            "noise",
            "decay",
            "contingency",
            "incoherence",
            "excess",
        ],
    },
    VocabularyMode {
        name: "SYNTHESIS",
        words: &[
            "synthesis",
            "constellation",
            "mapping",
            "relation",
            "resonance",
            "pattern",
            "assemblage",
            "coherence",
        ],
    },
];

/// Mode for a hexagram number in 1..=64: `(number - 1) % 8`.
pub fn mode_for_hexagram(number: u8) -> Result<&'static VocabularyMode> {
    if !(1..=64).contains(&number) {
        return Err(Error::InvalidArgument(format!(
            "hexagram number must be in 1..=64, got {number}"
        )));
    }
    Ok(&VOCABULARY_MODES[((number - 1) % 8) as usize])
}

/// Words picked for display and the indices among them to accent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordSelection {
    pub words: Vec<String>,
    pub highlighted: BTreeSet<usize>,
}

impl WordSelection {
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }
}

impl VocabularyMode {
    /// Shuffle the words with `rng`, keep `count`, then draw up to `highlights` indices.
    ///
    /// Highlight draws may repeat an index, so fewer than `highlights` can be marked.
    pub fn select(&self, rng: &mut dyn Rng, count: usize, highlights: usize) -> WordSelection {
        let mut words: Vec<String> = shuffle_with(rng, self.words)
            .into_iter()
            .map(str::to_owned)
            .collect();
        words.truncate(count);

        let mut highlighted = BTreeSet::new();
        let len = words.len();
        for _ in 0..highlights.min(len) {
            highlighted.insert((unit_f64(rng) * len as f64) as usize % len);
        }
        WordSelection { words, highlighted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeededStream;

    #[test]
    fn every_mode_has_eight_words() {
        for mode in &VOCABULARY_MODES {
            assert_eq!(mode.words.len(), 8, "{}", mode.name);
        }
    }

    #[test]
    fn modes_cycle_every_eight_hexagrams() {
        assert_eq!(mode_for_hexagram(1).unwrap().name, "STRUCTURE");
        assert_eq!(mode_for_hexagram(8).unwrap().name, "SYNTHESIS");
        assert_eq!(mode_for_hexagram(9).unwrap().name, "STRUCTURE");
        assert_eq!(mode_for_hexagram(64).unwrap().name, "SYNTHESIS");
    }

    #[test]
    fn out_of_range_hexagrams_are_rejected() {
        assert!(mode_for_hexagram(0).is_err());
        assert!(mode_for_hexagram(65).is_err());
    }

    #[test]
    fn selection_is_deterministic_subset() {
        let mode = &VOCABULARY_MODES[3];
        let a = mode.select(&mut SeededStream::new("2024-06-01-words"), 6, 2);
        let b = mode.select(&mut SeededStream::new("2024-06-01-words"), 6, 2);
        assert_eq!(a, b);
        assert_eq!(a.words.len(), 6);
        assert!(a.words.iter().all(|w| mode.words.contains(&w.as_str())));
        assert!(!a.highlighted.is_empty() && a.highlighted.len() <= 2);
        assert!(a.highlighted.iter().all(|&i| i < 6));
    }

    #[test]
    fn count_beyond_mode_keeps_all_words() {
        let mode = &VOCABULARY_MODES[0];
        let sel = mode.select(&mut SeededStream::new("all"), 20, 0);
        assert_eq!(sel.words.len(), 8);
        assert!(sel.highlighted.is_empty());
        assert!(!sel.is_highlighted(0));
    }
}
