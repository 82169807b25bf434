//! Axis-aligned label boxes in percent-of-canvas coordinates.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::config::LayoutConfig;
use crate::layout::CANVAS_EXTENT;

/// Estimated bounding box of a rendered label. `top < bottom`, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl LabelBox {
    /// Estimate the box of a label anchored at its top-left corner `anchor`.
    ///
    /// Width is `chars * char_width_px` (boosted for priority labels) and height is
    /// `line_height_px`, both divided by `px_per_percent`. A heuristic, not text metrics.
    pub fn estimate(anchor: Vec2, title_chars: usize, priority: bool, config: &LayoutConfig) -> Self {
        let size = Self::estimated_size(title_chars, priority, config);
        Self {
            left: anchor.x,
            right: anchor.x + size.x,
            top: anchor.y,
            bottom: anchor.y + size.y,
        }
    }

    /// Width and height in percent for a label of `title_chars` characters.
    pub fn estimated_size(title_chars: usize, priority: bool, config: &LayoutConfig) -> Vec2 {
        let boost = if priority {
            config.priority_width_factor
        } else {
            1.0
        };
        let width_px = title_chars as f32 * config.char_width_px * boost;
        Vec2::new(
            width_px / config.px_per_percent,
            config.line_height_px / config.px_per_percent,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Whether the two boxes come within `padding` (percent) of each other.
    ///
    /// Touching at exactly `padding` counts as overlap.
    pub fn overlaps(&self, other: &LabelBox, padding: f32) -> bool {
        !(self.right + padding < other.left
            || self.left > other.right + padding
            || self.bottom + padding < other.top
            || self.top > other.bottom + padding)
    }

    /// Whether the box stays inside the canvas shrunk by `margin` on every edge.
    pub fn within_margins(&self, margin: f32) -> bool {
        self.left >= margin
            && self.right <= CANVAS_EXTENT - margin
            && self.top >= margin
            && self.bottom <= CANVAS_EXTENT - margin
    }
}
