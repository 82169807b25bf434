//! Hexagram catalog loading, validation and merging.
//!
//! Records are read from JSON. Keywords may be stored either as a list or as one
//! comma-joined string (older data uses the `tags` key); both are normalised to a
//! trimmed `Vec<String>` at load time so nothing downstream has to care.
use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const HEXAGRAM_COUNT: u8 = 64;

/// One line of a hexagram; stored as `0` (yin, broken) or `1` (yang, solid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Line {
    Yin,
    Yang,
}

impl TryFrom<u8> for Line {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Line::Yin),
            1 => Ok(Line::Yang),
            other => Err(Error::InvalidData(format!(
                "hexagram line must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl From<Line> for u8 {
    fn from(line: Line) -> Self {
        match line {
            Line::Yin => 0,
            Line::Yang => 1,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordsRepr {
    List(Vec<String>),
    Joined(String),
}

impl KeywordsRepr {
    fn normalise(self) -> Vec<String> {
        let raw = match self {
            KeywordsRepr::List(list) => list,
            KeywordsRepr::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        };
        raw.into_iter()
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Deserialize)]
struct RawHexagram {
    number: u8,
    name: String,
    #[serde(default)]
    hanzi: String,
    lines: Vec<Line>,
    #[serde(default)]
    summary: String,
    #[serde(default, alias = "tags")]
    keywords: Option<KeywordsRepr>,
}

/// A validated hexagram record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHexagram")]
pub struct Hexagram {
    pub number: u8,
    pub name: String,
    pub hanzi: String,
    /// Bottom to top.
    pub lines: [Line; 6],
    pub summary: String,
    pub keywords: Vec<String>,
}

impl TryFrom<RawHexagram> for Hexagram {
    type Error = Error;

    fn try_from(raw: RawHexagram) -> Result<Self> {
        if !(1..=HEXAGRAM_COUNT).contains(&raw.number) {
            return Err(Error::InvalidData(format!(
                "hexagram number must be in 1..={HEXAGRAM_COUNT}, got {}",
                raw.number
            )));
        }
        let count = raw.lines.len();
        let lines: [Line; 6] = raw.lines.try_into().map_err(|_| {
            Error::InvalidData(format!(
                "hexagram {} must have exactly six lines, got {count}",
                raw.number
            ))
        })?;
        Ok(Self {
            number: raw.number,
            name: raw.name,
            hanzi: raw.hanzi,
            lines,
            summary: raw.summary,
            keywords: raw.keywords.map(KeywordsRepr::normalise).unwrap_or_default(),
        })
    }
}

impl Hexagram {
    /// Lines as a 6-bit number, bottom line in the least significant bit.
    pub fn bits(&self) -> u8 {
        self.lines
            .iter()
            .enumerate()
            .fold(0, |acc, (i, line)| acc | (u8::from(*line) << i))
    }

    /// Lines top to bottom, the order they are drawn in.
    pub fn lines_top_down(&self) -> impl Iterator<Item = Line> + '_ {
        self.lines.iter().rev().copied()
    }
}

/// Freshly scraped name and description for one hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedHexagram {
    pub number: u8,
    pub name: String,
    pub description: String,
}

/// All hexagrams, sorted by number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexagramCatalog {
    hexagrams: Vec<Hexagram>,
}

impl HexagramCatalog {
    /// Builds a catalog from records, rejecting duplicate numbers.
    pub fn try_new(mut hexagrams: Vec<Hexagram>) -> Result<Self> {
        hexagrams.sort_by_key(|h| h.number);
        let mut seen = HashSet::with_capacity(hexagrams.len());
        for h in &hexagrams {
            if !seen.insert(h.number) {
                return Err(Error::InvalidData(format!(
                    "duplicate hexagram number {}",
                    h.number
                )));
            }
        }
        debug!("Loaded {} hexagrams.", hexagrams.len());
        Ok(Self { hexagrams })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::try_new(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::try_new(serde_json::from_reader(reader)?)
    }

    pub fn get(&self, number: u8) -> Option<&Hexagram> {
        self.hexagrams
            .binary_search_by_key(&number, |h| h.number)
            .ok()
            .map(|i| &self.hexagrams[i])
    }

    /// Like [`get`](Self::get) but falls back to the lowest-numbered hexagram.
    pub fn get_or_first(&self, number: u8) -> Option<&Hexagram> {
        self.get(number).or_else(|| self.hexagrams.first())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hexagram> {
        self.hexagrams.iter()
    }

    pub fn len(&self) -> usize {
        self.hexagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexagrams.is_empty()
    }

    /// Replaces name and summary with scraped values, keeping hanzi, lines and keywords.
    ///
    /// Scraped records without a matching number are ignored. Returns how many
    /// hexagrams were updated.
    pub fn merge_scraped(&mut self, scraped: &[ScrapedHexagram]) -> usize {
        let mut updated = 0;
        for hexagram in &mut self.hexagrams {
            if let Some(s) = scraped.iter().find(|s| s.number == hexagram.number) {
                hexagram.name = s.name.clone();
                hexagram.summary = s.description.clone();
                updated += 1;
            }
        }
        info!(
            "Merged {updated} of {} hexagrams from {} scraped records.",
            self.hexagrams.len(),
            scraped.len()
        );
        updated
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.hexagrams)?)
    }
}

impl<'a> IntoIterator for &'a HexagramCatalog {
    type Item = &'a Hexagram;
    type IntoIter = std::slice::Iter<'a, Hexagram>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"number": 2, "name": "Kun", "hanzi": "坤", "lines": [0,0,0,0,0,0],
         "summary": "earth", "tags": ["receptivity", "support"]},
        {"number": 1, "name": "Qian", "hanzi": "乾", "lines": [1,1,1,1,1,1],
         "summary": "heaven", "keywords": "initiative, strength ,, persistence"}
    ]"#;

    #[test]
    fn loads_and_sorts_by_number() {
        let catalog = HexagramCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        let numbers: Vec<u8> = catalog.iter().map(|h| h.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn keywords_are_normalised() {
        let catalog = HexagramCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            catalog.get(1).unwrap().keywords,
            vec!["initiative", "strength", "persistence"]
        );
        assert_eq!(catalog.get(2).unwrap().keywords, vec!["receptivity", "support"]);
    }

    #[test]
    fn missing_keywords_default_to_empty() {
        let json = r#"[{"number": 3, "name": "Zhun", "lines": [1,0,0,0,1,0]}]"#;
        let catalog = HexagramCatalog::from_json_str(json).unwrap();
        let h = catalog.get(3).unwrap();
        assert!(h.keywords.is_empty());
        assert_eq!(h.hanzi, "");
        assert_eq!(h.bits(), 0b010001);
        let top_down: Vec<Line> = h.lines_top_down().collect();
        assert_eq!(top_down[0], Line::Yin);
        assert_eq!(top_down[1], Line::Yang);
    }

    #[test]
    fn rejects_invalid_records() {
        let bad_line = r#"[{"number": 1, "name": "x", "lines": [1,1,2,1,1,1]}]"#;
        let short = r#"[{"number": 1, "name": "x", "lines": [1,1,1]}]"#;
        let range = r#"[{"number": 65, "name": "x", "lines": [1,1,1,1,1,1]}]"#;
        let dup = r#"[{"number": 1, "name": "a", "lines": [1,1,1,1,1,1]},
                      {"number": 1, "name": "b", "lines": [0,0,0,0,0,0]}]"#;
        for json in [bad_line, short, range] {
            assert!(matches!(
                HexagramCatalog::from_json_str(json),
                Err(Error::Json(_))
            ));
        }
        assert!(matches!(
            HexagramCatalog::from_json_str(dup),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn get_or_first_falls_back() {
        let catalog = HexagramCatalog::from_json_str(SAMPLE).unwrap();
        assert!(catalog.get(40).is_none());
        assert_eq!(catalog.get_or_first(40).unwrap().number, 1);
        assert!(HexagramCatalog::default().get_or_first(1).is_none());
    }

    #[test]
    fn merge_keeps_lines_and_keywords() {
        let mut catalog = HexagramCatalog::from_json_str(SAMPLE).unwrap();
        let scraped = vec![
            ScrapedHexagram {
                number: 2,
                name: "K'un".into(),
                description: "the receptive".into(),
            },
            ScrapedHexagram {
                number: 50,
                name: "Ding".into(),
                description: "the cauldron".into(),
            },
        ];
        assert_eq!(catalog.merge_scraped(&scraped), 1);
        let kun = catalog.get(2).unwrap();
        assert_eq!(kun.name, "K'un");
        assert_eq!(kun.summary, "the receptive");
        assert_eq!(kun.hanzi, "坤");
        assert_eq!(kun.lines, [Line::Yin; 6]);
        assert_eq!(kun.keywords, vec!["receptivity", "support"]);
        assert_eq!(catalog.get(1).unwrap().name, "Qian");
    }

    #[test]
    fn pretty_json_reloads() {
        let catalog = HexagramCatalog::from_json_str(SAMPLE).unwrap();
        let json = catalog.to_json_pretty().unwrap();
        assert!(json.contains("\"keywords\""));
        assert_eq!(HexagramCatalog::from_json_str(&json).unwrap(), catalog);
    }
}
