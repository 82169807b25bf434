#![forbid(unsafe_code)]
//! daily_field: deterministic daily content selection and collision-avoiding label scatter.
//!
//! Modules:
//! - seed: string hash, seeded streams, and day-bucketed seed keys
//! - selection: index, shuffle, subset, and hash-rank selection over a seed
//! - layout: non-overlapping label placement with exclusion zones and a fallback grid
//! - daily: hexagram catalog, vocabulary modes, and content snapshots tied to a day
//! - simulation: bounce simulation driven by an external frame clock
//!
//! For examples, see the `daily_field_examples` crate.
pub mod daily;
pub mod error;
pub mod layout;
pub mod seed;
pub mod selection;
pub mod simulation;

/// Convenient re-exports for common types. Import with `use daily_field::prelude::*;`.
pub mod prelude {
    pub use crate::daily::content::{
        CatalogItem, Category, ReadingSnapshot, Shelf, WorkSnapshot,
    };
    pub use crate::daily::hexagram::{Hexagram, HexagramCatalog, Line, ScrapedHexagram};
    pub use crate::daily::vocabulary::{VocabularyMode, WordSelection, VOCABULARY_MODES};
    pub use crate::daily::Daily;
    pub use crate::error::{Error, Result};
    pub use crate::layout::bands::{Band, BandScatter};
    pub use crate::layout::config::{FallbackGrid, LayoutConfig};
    pub use crate::layout::engine::{
        compute_placements, compute_placements_with_events, FieldLayoutEngine, LayoutResult,
        Placement, PlacementOrigin,
    };
    pub use crate::layout::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::geometry::LabelBox;
    pub use crate::layout::zone::ExclusionZone;
    pub use crate::layout::{ItemId, LabelItem};
    pub use crate::seed::hash::string_hash;
    pub use crate::seed::key::SeedKey;
    pub use crate::seed::stream::{HashSequence, SeededStream};
    pub use crate::selection::{
        daily_index, deterministic_shuffle, deterministic_subset, rank_by_hash, shuffle_with,
        HasId,
    };
    pub use crate::simulation::{drive, BounceSimulation, FixedClock, FrameClock};
}
