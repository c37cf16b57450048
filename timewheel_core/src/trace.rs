// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for selection, animation and layout.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! engine reports. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use kurbo::Size;

use crate::throttle::Admission;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a selection request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The theme is already selected.
    AlreadySelected,
    /// No theme has this id.
    UnknownTheme,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a selection transition starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionEvent {
    /// When the transition started.
    pub at: HostTime,
    /// The previously selected theme.
    pub previous: Option<u32>,
    /// The newly selected theme.
    pub selected: u32,
    /// Ring rotation when the transition started, in degrees.
    pub from_rotation: f64,
    /// Rotation the ring is heading to, in degrees.
    pub target_rotation: f64,
}

/// Emitted when a selection request is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionIgnoredEvent {
    /// When the request arrived.
    pub at: HostTime,
    /// The requested theme id.
    pub id: u32,
    /// Why it was ignored.
    pub reason: IgnoreReason,
}

/// Emitted when a transition cancels tweens that were still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelEvent {
    /// When the tweens were canceled.
    pub at: HostTime,
    /// How many tweens were removed.
    pub canceled: usize,
}

/// Emitted when the ring settles on its target rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationFinishedEvent {
    /// When the rotation tween completed.
    pub at: HostTime,
    /// The selected theme.
    pub selected: u32,
    /// Final rotation in degrees.
    pub rotation: f64,
}

/// Emitted when the theme label has fully faded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelShownEvent {
    /// When the fade completed.
    pub at: HostTime,
    /// The labeled theme.
    pub theme: u32,
}

/// Emitted when the hovered dot changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverEvent {
    /// When hover changed.
    pub at: HostTime,
    /// The previously hovered dot.
    pub previous: Option<u32>,
    /// The hovered dot, `None` when the pointer left.
    pub hovered: Option<u32>,
}

/// Emitted for every viewport size report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// When the size was reported.
    pub at: HostTime,
    /// The reported size.
    pub size: Size,
    /// What the throttle did with it.
    pub admission: Admission,
}

/// Emitted when a viewport size is applied to the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEvent {
    /// When the layout was applied.
    pub at: HostTime,
    /// The applied size.
    pub size: Size,
    /// Ring radius for this size.
    pub circle_radius: f64,
    /// Number of dots laid out.
    pub dots: usize,
    /// Whether the layout came from the cache.
    pub cache_hit: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a selection transition starts.
    fn on_selection(&mut self, e: &SelectionEvent) {
        _ = e;
    }

    /// Called when a selection request is ignored.
    fn on_selection_ignored(&mut self, e: &SelectionIgnoredEvent) {
        _ = e;
    }

    /// Called when running tweens are canceled by a new transition.
    fn on_cancel(&mut self, e: &CancelEvent) {
        _ = e;
    }

    /// Called when the ring reaches its target rotation.
    fn on_rotation_finished(&mut self, e: &RotationFinishedEvent) {
        _ = e;
    }

    /// Called when the theme label finishes fading in.
    fn on_label_shown(&mut self, e: &LabelShownEvent) {
        _ = e;
    }

    /// Called when the hovered dot changes.
    fn on_hover(&mut self, e: &HoverEvent) {
        _ = e;
    }

    /// Called for every viewport size report.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when a new layout is applied.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SelectionEvent`].
    #[inline]
    pub fn selection(&mut self, e: &SelectionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_selection(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SelectionIgnoredEvent`].
    #[inline]
    pub fn selection_ignored(&mut self, e: &SelectionIgnoredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_selection_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CancelEvent`].
    #[inline]
    pub fn cancel(&mut self, e: &CancelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cancel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RotationFinishedEvent`].
    #[inline]
    pub fn rotation_finished(&mut self, e: &RotationFinishedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rotation_finished(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LabelShownEvent`].
    #[inline]
    pub fn label_shown(&mut self, e: &LabelShownEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_label_shown(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HoverEvent`].
    #[inline]
    pub fn hover(&mut self, e: &HoverEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hover(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection() -> SelectionEvent {
        SelectionEvent {
            at: HostTime::from_millis(16),
            previous: Some(1),
            selected: 3,
            from_rotation: 300.0,
            target_rotation: 180.0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_selection(&sample_selection());
        sink.on_hover(&HoverEvent {
            at: HostTime(0),
            previous: None,
            hovered: Some(2),
        });
        sink.on_resize(&ResizeEvent {
            at: HostTime(0),
            size: Size::new(800.0, 600.0),
            admission: Admission::Now,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.selection(&sample_selection());
        tracer.label_shown(&LabelShownEvent {
            at: HostTime(0),
            theme: 1,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            selected: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_selection(&mut self, e: &SelectionEvent) {
                self.selected.push(e.selected);
            }
        }

        let mut sink = RecordingSink {
            selected: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.selection(&sample_selection());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.selected, &[3]);
    }
}
