//! JSON content snapshots and the flat item catalog built from them.
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::selection::HasId;

/// Characters of the first description paragraph kept in a work blurb.
pub const WORK_BLURB_CHARS: usize = 80;
/// Shelf order used when a shelf does not declare one.
pub const DEFAULT_SHELF_ORDER: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Reading,
}

/// One entry of the unified content catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Free-form kind label, e.g. "Essay series" or "Reading".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub blurb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Display name of the shelf a reading item came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
}

impl HasId for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub name: String,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub description: Vec<Paragraph>,
    #[serde(default)]
    pub external_link: Option<String>,
}

impl WorkEntry {
    /// First [`WORK_BLURB_CHARS`] characters of the first paragraph plus "...".
    /// Empty when there is no description.
    pub fn blurb(&self) -> String {
        match self.description.first() {
            Some(p) => {
                let mut blurb: String = p.text.chars().take(WORK_BLURB_CHARS).collect();
                blurb.push_str("...");
                blurb
            }
            None => String::new(),
        }
    }
}

/// Snapshot of the work listing: `{"data": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSnapshot {
    #[serde(default)]
    pub data: Vec<WorkEntry>,
}

impl WorkSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Catalog items with ids `work-{index}` in listing order.
    pub fn items(&self) -> Vec<CatalogItem> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, entry)| CatalogItem {
                id: format!("work-{index}"),
                title: entry.name.clone(),
                category: Category::Work,
                kind: entry.technology.clone(),
                blurb: entry.blurb(),
                link: entry.external_link.clone(),
                author: None,
                shelf: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    /// Key of the shelf in the snapshot.
    #[serde(skip)]
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Shelf {
    pub fn effective_order(&self) -> u32 {
        self.order.unwrap_or(DEFAULT_SHELF_ORDER)
    }
}

/// Snapshot of the reading list: `{"shelves": {key: {...}}}`.
///
/// Shelves keep the order they have in the file; a repeated key replaces the
/// earlier shelf in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSnapshot {
    #[serde(default, with = "shelf_map")]
    pub shelves: Vec<Shelf>,
}

mod shelf_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        shelves: &[Shelf],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(shelves.len()))?;
        for shelf in shelves {
            map.serialize_entry(&shelf.key, shelf)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<Shelf>, D::Error> {
        deserializer.deserialize_map(ShelfVisitor)
    }

    struct ShelfVisitor;

    impl<'de> Visitor<'de> for ShelfVisitor {
        type Value = Vec<Shelf>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of shelves keyed by name")
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut shelves: Vec<Shelf> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, mut shelf)) = access.next_entry::<String, Shelf>()? {
                shelf.key = key;
                match shelves.iter_mut().find(|s| s.key == shelf.key) {
                    Some(existing) => *existing = shelf,
                    None => shelves.push(shelf),
                }
            }
            Ok(shelves)
        }
    }
}

impl ReadingSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Shelves sorted by order (missing order counts as 99), ties in file order.
    pub fn shelves(&self) -> Vec<Shelf> {
        let mut shelves = self.shelves.clone();
        shelves.sort_by_key(Shelf::effective_order);
        shelves
    }

    /// Every book as a catalog item, shelves in file order.
    ///
    /// Books without an id get `reading-{n}`, where `n` counts items emitted so far.
    pub fn items(&self) -> Vec<CatalogItem> {
        let mut items = Vec::new();
        for shelf in &self.shelves {
            for book in &shelf.books {
                let id = book
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("reading-{}", items.len()));
                let blurb = book.note.clone().unwrap_or_else(|| {
                    format!("By {}", book.author.as_deref().unwrap_or("unknown"))
                });
                items.push(CatalogItem {
                    id,
                    title: book.title.clone(),
                    category: Category::Reading,
                    kind: Some("Reading".to_owned()),
                    blurb,
                    link: book.link.clone(),
                    author: book.author.clone(),
                    shelf: Some(shelf.display_name.clone()),
                });
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORK: &str = r#"{"data": [
        {"name": "Signals", "technology": "Essay series",
         "description": [{"text": "A long essay on infrastructure, protocol and the quiet logistics of the everyday city."}],
         "externalLink": "https://example.org/signals"},
        {"name": "Short", "description": [{"text": "Brief."}]},
        {"name": "Bare"}
    ]}"#;

    const READING: &str = r#"{"shelves": {
        "now": {"displayName": "Now reading", "order": 1,
                "books": [{"title": "Seeing Like a State", "author": "James C. Scott"}]},
        "archive": {"displayName": "Archive",
                "books": [{"id": "b-7", "title": "The Stack", "note": "On planetary computation"},
                          {"title": "Cybernetic Revolutionaries", "author": "Eden Medina"}]}
    }}"#;

    #[test]
    fn work_items_follow_listing_order() {
        let items = WorkSnapshot::from_json_str(WORK).unwrap().items();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["work-0", "work-1", "work-2"]);
        assert_eq!(items[0].kind.as_deref(), Some("Essay series"));
        assert_eq!(items[0].link.as_deref(), Some("https://example.org/signals"));
        assert_eq!(items[0].category, Category::Work);
    }

    #[test]
    fn work_blurb_truncates_to_eighty_chars() {
        let items = WorkSnapshot::from_json_str(WORK).unwrap().items();
        assert_eq!(items[0].blurb.chars().count(), WORK_BLURB_CHARS + 3);
        assert!(items[0].blurb.ends_with("..."));
        assert_eq!(items[1].blurb, "Brief....");
        assert_eq!(items[2].blurb, "");
    }

    #[test]
    fn reading_items_number_missing_ids_globally() {
        let items = ReadingSnapshot::from_json_str(READING).unwrap().items();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["reading-0", "b-7", "reading-2"]);
        assert_eq!(items[0].shelf.as_deref(), Some("Now reading"));
        assert_eq!(items[1].blurb, "On planetary computation");
        assert_eq!(items[2].blurb, "By Eden Medina");
    }

    #[test]
    fn shelves_keep_file_order_over_key_order() {
        let json = r#"{"shelves": {
            "zeta": {"displayName": "Zeta", "order": 1, "books": [{"title": "A"}]},
            "alpha": {"displayName": "Alpha", "order": 1, "books": [{"title": "B"}]}
        }}"#;
        let snapshot = ReadingSnapshot::from_json_str(json).unwrap();
        let items = snapshot.items();
        let pairs: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i.id.as_str(), i.title.as_str()))
            .collect();
        assert_eq!(pairs, vec![("reading-0", "A"), ("reading-1", "B")]);

        let keys: Vec<String> = snapshot.shelves().into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
        assert_eq!(ReadingSnapshot::from_json_str(&json).unwrap(), snapshot);
    }

    #[test]
    fn repeated_shelf_key_replaces_in_place() {
        let json = r#"{"shelves": {
            "a": {"displayName": "First"},
            "b": {"displayName": "Second"},
            "a": {"displayName": "Again"}
        }}"#;
        let shelves = ReadingSnapshot::from_json_str(json).unwrap().shelves;
        let names: Vec<&str> = shelves.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Again", "Second"]);
    }

    #[test]
    fn shelves_sort_by_order_with_default() {
        let shelves = ReadingSnapshot::from_json_str(READING).unwrap().shelves();
        let keys: Vec<&str> = shelves.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["now", "archive"]);
        assert_eq!(shelves[1].effective_order(), DEFAULT_SHELF_ORDER);
    }

    #[test]
    fn empty_snapshots_yield_nothing() {
        assert!(WorkSnapshot::from_json_str("{}").unwrap().items().is_empty());
        assert!(ReadingSnapshot::from_json_str("{}").unwrap().items().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WorkSnapshot::from_json_str("{\"data\": 3}").is_err());
    }
}
