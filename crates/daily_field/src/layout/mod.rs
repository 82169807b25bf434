//! Label layout for scattering titles across a normalized [0, 100] x [0, 100] canvas.
use serde::{Deserialize, Serialize};

use crate::selection::HasId;

pub mod bands;
pub mod config;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod zone;

/// Percent-space extent of the layout canvas on both axes.
pub const CANVAS_EXTENT: f32 = 100.0;

pub type ItemId = String;

/// A title to place, flagged for central placement when `priority` is set.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub priority: bool,
}

impl LabelItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: false,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Title length in characters, as used for box estimation.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

impl HasId for LabelItem {
    fn id(&self) -> &str {
        &self.id
    }
}
