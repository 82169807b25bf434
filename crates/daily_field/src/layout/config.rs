//! Geometry constants for a layout run.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::CANVAS_EXTENT;

/// Deterministic grid used when random search cannot place an item.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackGrid {
    /// Number of columns; item `i` lands in column `i % columns`.
    pub columns: usize,
    /// Horizontal distance between columns in percent.
    pub column_step: f32,
    /// Vertical distance between rows in percent.
    pub row_step: f32,
    /// Offset of the first row below the top margin in percent.
    pub top_offset: f32,
}

impl Default for FallbackGrid {
    fn default() -> Self {
        Self {
            columns: 4,
            column_step: 22.0,
            row_step: 10.0,
            top_offset: 15.0,
        }
    }
}

impl FallbackGrid {
    pub fn new(columns: usize, column_step: f32, row_step: f32) -> Self {
        Self {
            columns,
            column_step,
            row_step,
            ..Default::default()
        }
    }

    pub fn with_top_offset(mut self, top_offset: f32) -> Self {
        self.top_offset = top_offset;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::InvalidArgument(
                "fallback grid needs at least one column".into(),
            ));
        }
        if !(self.column_step.is_finite() && self.column_step > 0.0) {
            return Err(Error::InvalidArgument(
                "fallback column_step must be > 0".into(),
            ));
        }
        if !(self.row_step.is_finite() && self.row_step > 0.0) {
            return Err(Error::InvalidArgument(
                "fallback row_step must be > 0".into(),
            ));
        }
        if !(self.top_offset.is_finite() && self.top_offset >= 0.0) {
            return Err(Error::InvalidArgument(
                "fallback top_offset must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for a label layout run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Keep-out band on every canvas edge, in percent.
    pub edge_margin: f32,
    /// Minimum spacing between label boxes, in pixels.
    pub min_padding_px: f32,
    /// Random placement attempts per item before falling back to the grid.
    pub max_attempts: usize,
    /// Estimated rendered width of one character, in pixels.
    pub char_width_px: f32,
    /// Estimated rendered height of a label, in pixels.
    pub line_height_px: f32,
    /// Pixels per percent of canvas; 8 corresponds to an 800 px canvas.
    pub px_per_percent: f32,
    /// Width multiplier for priority labels.
    pub priority_width_factor: f32,
    /// How much the priority sampling range is shrunk on each axis, in percent.
    pub priority_inset: Vec2,
    /// Grid used for items the random search could not place.
    pub fallback: FallbackGrid,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edge_margin: 6.0,
            min_padding_px: 18.0,
            max_attempts: 200,
            char_width_px: 7.0,
            line_height_px: 24.0,
            px_per_percent: 8.0,
            priority_width_factor: 1.1,
            priority_inset: Vec2::new(15.0, 10.0),
            fallback: FallbackGrid::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_margin(mut self, edge_margin: f32) -> Self {
        self.edge_margin = edge_margin;
        self
    }

    pub fn with_min_padding_px(mut self, min_padding_px: f32) -> Self {
        self.min_padding_px = min_padding_px;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the per-character width and line height estimates in pixels.
    pub fn with_text_metrics(mut self, char_width_px: f32, line_height_px: f32) -> Self {
        self.char_width_px = char_width_px;
        self.line_height_px = line_height_px;
        self
    }

    pub fn with_px_per_percent(mut self, px_per_percent: f32) -> Self {
        self.px_per_percent = px_per_percent;
        self
    }

    pub fn with_priority_width_factor(mut self, factor: f32) -> Self {
        self.priority_width_factor = factor;
        self
    }

    pub fn with_priority_inset(mut self, inset: Vec2) -> Self {
        self.priority_inset = inset;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackGrid) -> Self {
        self.fallback = fallback;
        self
    }

    /// Padding between boxes converted to percent.
    pub fn padding_percent(&self) -> f32 {
        self.min_padding_px / self.px_per_percent
    }

    /// Extent of the canvas left after removing the margin on both sides.
    pub fn usable_extent(&self) -> f32 {
        CANVAS_EXTENT - 2.0 * self.edge_margin
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.edge_margin.is_finite()
            && self.edge_margin >= 0.0
            && self.edge_margin < CANVAS_EXTENT / 2.0)
        {
            return Err(Error::InvalidArgument(
                "edge_margin must be in [0, 50)".into(),
            ));
        }
        if !(self.min_padding_px.is_finite() && self.min_padding_px >= 0.0) {
            return Err(Error::InvalidArgument(
                "min_padding_px must be >= 0".into(),
            ));
        }
        for (name, value) in [
            ("char_width_px", self.char_width_px),
            ("line_height_px", self.line_height_px),
            ("px_per_percent", self.px_per_percent),
            ("priority_width_factor", self.priority_width_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidArgument(format!("{name} must be > 0")));
            }
        }
        let usable = self.usable_extent();
        if !self.priority_inset.is_finite()
            || self.priority_inset.x < 0.0
            || self.priority_inset.y < 0.0
            || self.priority_inset.x >= usable
            || self.priority_inset.y >= usable
        {
            return Err(Error::InvalidArgument(format!(
                "priority_inset must be in [0, {usable}) on both axes"
            )));
        }
        self.fallback.validate()
    }
}
