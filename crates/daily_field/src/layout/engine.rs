//! Field layout engine: scatter labels without overlap, avoiding exclusion zones.
//!
//! Items are placed one at a time, priority items first. Each item gets up to
//! `max_attempts` random candidates; the first candidate whose box stays inside the
//! margins, whose center avoids every zone, and which keeps the padding to all boxes
//! placed so far is committed. When search is exhausted the item goes to a cell of a
//! deterministic grid derived from its index, so every input item is always placed.
use std::collections::{HashMap, HashSet};

use glam::Vec2;
use mint::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::layout::config::LayoutConfig;
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::geometry::LabelBox;
use crate::layout::zone::{in_any_zone, ExclusionZone};
use crate::layout::{ItemId, LabelItem, CANVAS_EXTENT};
use crate::seed::unit_f32;

/// How a placement was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum PlacementOrigin {
    /// Accepted random candidate; `attempt` is zero-based.
    Search { attempt: usize },
    /// Grid cell used after search was exhausted.
    Fallback { row: usize, column: usize },
}

/// Represents a committed label position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier of the placed item.
    pub item_id: ItemId,
    /// Top-left anchor of the label in percent.
    pub position: Vec2,
    /// Estimated box of the label at `position`.
    pub label_box: LabelBox,
    /// Whether the item was placed as a priority item.
    pub priority: bool,
    /// Whether the position came from random search or the fallback grid.
    pub origin: PlacementOrigin,
}

impl Placement {
    /// True when random search gave up and the grid cell was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PlacementOrigin::Fallback { .. })
    }
}

/// Result of a layout run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Placements in placement order (priority items first).
    pub placements: Vec<Placement>,
    /// Random candidates drawn over the whole run.
    pub attempts: usize,
    /// Items that ended up on the fallback grid.
    pub fallbacks: usize,
}

impl LayoutResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placements, equal to the number of input items.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placement of the item with `item_id`, if it was part of the run.
    pub fn get(&self, item_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.item_id == item_id)
    }

    /// Map of item id to top-left anchor, for renderers.
    pub fn position_map(&self) -> HashMap<ItemId, Vector2<f32>> {
        self.placements
            .iter()
            .map(|p| (p.item_id.clone(), p.position.into()))
            .collect()
    }
}

/// Layout engine bound to a validated configuration and a set of exclusion zones.
#[derive(Debug, Clone)]
pub struct FieldLayoutEngine {
    pub config: LayoutConfig,
    pub zones: Vec<ExclusionZone>,
}

impl FieldLayoutEngine {
    pub fn try_new(config: LayoutConfig, zones: Vec<ExclusionZone>) -> Result<Self> {
        config.validate()?;
        for zone in &zones {
            zone.validate()?;
        }
        Ok(Self { config, zones })
    }

    /// Place `items` with draws from `rng`.
    pub fn run(&self, items: &[LabelItem], rng: &mut impl Rng) -> Result<LayoutResult> {
        compute_placements(items, &self.zones, &self.config, rng)
    }

    pub fn run_with_events(
        &self,
        items: &[LabelItem],
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutResult> {
        compute_placements_with_events(items, &self.zones, &self.config, rng, sink)
    }
}

/// Compute non-overlapping placements for `items`.
///
/// Fails with [`Error::InvalidArgument`] on invalid geometry, malformed zones, or
/// duplicate item ids; otherwise returns exactly one placement per item.
pub fn compute_placements<R: Rng>(
    items: &[LabelItem],
    zones: &[ExclusionZone],
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<LayoutResult> {
    compute_placements_with_events(items, zones, config, rng, &mut ())
}

pub fn compute_placements_with_events<R: Rng>(
    items: &[LabelItem],
    zones: &[ExclusionZone],
    config: &LayoutConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<LayoutResult> {
    config.validate()?;
    for zone in zones {
        zone.validate()?;
    }
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "duplicate item id '{}'",
                item.id
            )));
        }
    }

    if sink.wants(LayoutEventKind::RunStarted) {
        sink.send(LayoutEvent::RunStarted {
            config: config.clone(),
            item_count: items.len(),
            zone_count: zones.len(),
        });
    }

    // Stable: priority items first, input order otherwise.
    let mut ordered: Vec<&LabelItem> = items.iter().collect();
    ordered.sort_by_key(|item| !item.priority);

    let padding = config.padding_percent();
    let mut placed: Vec<Placement> = Vec::with_capacity(items.len());
    let mut attempts_total = 0;
    let mut fallbacks = 0;

    for (index, item) in ordered.into_iter().enumerate() {
        let size = LabelBox::estimated_size(item.title_len(), item.priority, config);

        let mut found = None;
        for attempt in 0..config.max_attempts {
            attempts_total += 1;
            let anchor = sample_anchor(item.priority, config, rng);
            let candidate = LabelBox::estimate(anchor, item.title_len(), item.priority, config);

            if !candidate.within_margins(config.edge_margin) {
                continue;
            }
            if in_any_zone(zones, candidate.center()) {
                continue;
            }
            if placed
                .iter()
                .any(|p| candidate.overlaps(&p.label_box, padding))
            {
                continue;
            }

            found = Some(Placement {
                item_id: item.id.clone(),
                position: anchor,
                label_box: candidate,
                priority: item.priority,
                origin: PlacementOrigin::Search { attempt },
            });
            break;
        }

        let placement = match found {
            Some(p) => {
                debug!("Item '{}' placed at {}.", item.id, p.position);
                p
            }
            None => {
                fallbacks += 1;
                let (anchor, row, column) = fallback_cell(index, size, config);
                warn!(
                    "Item '{}' fell back to grid cell ({}, {}) after {} attempts.",
                    item.id, row, column, config.max_attempts
                );
                if sink.wants(LayoutEventKind::FallbackUsed) {
                    sink.send(LayoutEvent::FallbackUsed {
                        index,
                        item_id: item.id.clone(),
                        attempts: config.max_attempts,
                    });
                }
                if size.x > config.usable_extent() || size.y > config.usable_extent() {
                    warn!(
                        "Item '{}' is larger than the usable canvas; pinned to the margin.",
                        item.id
                    );
                    if sink.wants(LayoutEventKind::Warning) {
                        sink.send(LayoutEvent::Warning {
                            context: format!("item:{}", item.id),
                            message: "Label is larger than the usable canvas".into(),
                        });
                    }
                }
                Placement {
                    item_id: item.id.clone(),
                    position: anchor,
                    label_box: LabelBox::estimate(
                        anchor,
                        item.title_len(),
                        item.priority,
                        config,
                    ),
                    priority: item.priority,
                    origin: PlacementOrigin::Fallback { row, column },
                }
            }
        };

        if sink.wants(LayoutEventKind::ItemPlaced) {
            sink.send(LayoutEvent::ItemPlaced {
                index,
                placement: placement.clone(),
            });
        }
        placed.push(placement);
    }

    info!(
        "Layout placed {} items ({} via fallback) in {} attempts.",
        placed.len(),
        fallbacks,
        attempts_total
    );

    let result = LayoutResult {
        placements: placed,
        attempts: attempts_total,
        fallbacks,
    };

    if sink.wants(LayoutEventKind::RunFinished) {
        sink.send(LayoutEvent::RunFinished {
            result: result.clone(),
        });
    }

    Ok(result)
}

/// Draw a candidate top-left anchor. Priority items sample a range shrunk by
/// `priority_inset`, which keeps them away from the right and bottom edges.
fn sample_anchor(priority: bool, config: &LayoutConfig, rng: &mut dyn Rng) -> Vec2 {
    let m = config.edge_margin;
    let usable = config.usable_extent();
    let span = if priority {
        Vec2::new(
            usable - config.priority_inset.x,
            usable - config.priority_inset.y,
        )
    } else {
        Vec2::splat(usable)
    };
    let u = unit_f32(rng);
    let v = unit_f32(rng);
    Vec2::new(m + u * span.x, m + v * span.y)
}

/// Grid cell for the item at `index`, clamped so a box of `size` stays in the margins.
///
/// Rows wrap once they would run past the bottom margin. Returns `(anchor, row, column)`.
fn fallback_cell(index: usize, size: Vec2, config: &LayoutConfig) -> (Vec2, usize, usize) {
    let grid = &config.fallback;
    let m = config.edge_margin;
    let max_x = CANVAS_EXTENT - m - size.x;
    let max_y = CANVAS_EXTENT - m - size.y;
    let first_y = m + grid.top_offset;

    let rows = if max_y >= first_y {
        // A vanishing row step gives an unbounded quotient; the cast saturates.
        (((max_y - first_y) / grid.row_step).floor() as usize).saturating_add(1)
    } else {
        1
    };
    let column = index % grid.columns;
    let row = (index / grid.columns) % rows;

    let x = (m + column as f32 * grid.column_step).min(max_x).max(m);
    let y = (first_y + row as f32 * grid.row_step).min(max_y).max(m);
    (Vec2::new(x, y), row, column)
}
