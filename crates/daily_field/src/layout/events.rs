//! Event types and sinks for observing layout runs.
//!
//! This module defines [`LayoutEvent`] and a set of sinks to drop, collect, or forward
//! events while executing [`crate::layout::engine::compute_placements_with_events`]
//! or [`crate::layout::engine::FieldLayoutEngine::run_with_events`].
use crate::layout::config::LayoutConfig;
use crate::layout::engine::{LayoutResult, Placement};
use crate::layout::ItemId;

/// Describes events emitted by layout runs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// The configuration used.
        config: LayoutConfig,
        /// Number of items to place.
        item_count: usize,
        /// Number of exclusion zones.
        zone_count: usize,
    },

    /// Emitted when the run finishes.
    RunFinished {
        /// Final result.
        result: LayoutResult,
    },

    /// Emitted when an item was committed, by search or by fallback.
    ItemPlaced {
        /// Index of the item in placement order (priority first).
        index: usize,
        /// The placement data.
        placement: Placement,
    },

    /// Emitted when random search gave up and the grid was used.
    FallbackUsed {
        /// Index of the item in placement order.
        index: usize,
        /// Identifier of the item.
        item_id: ItemId,
        /// Attempts spent before falling back.
        attempts: usize,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. item id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`LayoutEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    RunFinished,
    ItemPlaced,
    FallbackUsed,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
            LayoutEvent::ItemPlaced { .. } => LayoutEventKind::ItemPlaced,
            LayoutEvent::FallbackUsed { .. } => LayoutEventKind::FallbackUsed,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = LayoutEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
    only: Option<Vec<LayoutEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events whose kind is in `kinds`.
    pub fn filtered(kinds: impl IntoIterator<Item = LayoutEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to every contained sink that wants it.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        let kind = event.kind();
        for sink in self.sinks.iter_mut().filter(|s| s.wants(kind)) {
            sink.send(event.clone());
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
