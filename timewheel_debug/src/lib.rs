// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for timewheel
//! diagnostics.
//!
//! This crate provides [`TraceSink`](timewheel_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`Tee`]: forwards every event to two sinks.

use timewheel_core::trace::{
    CancelEvent, HoverEvent, LabelShownEvent, LayoutEvent, ResizeEvent, RotationFinishedEvent,
    SelectionEvent, SelectionIgnoredEvent, TraceSink,
};

pub mod chrome;
pub mod pretty;
pub mod recorder;

/// Forwards every event to two sinks, first `a` then `b`.
#[derive(Debug)]
pub struct Tee<'a, A: TraceSink, B: TraceSink> {
    /// First receiver.
    pub a: &'a mut A,
    /// Second receiver.
    pub b: &'a mut B,
}

impl<'a, A: TraceSink, B: TraceSink> Tee<'a, A, B> {
    /// Pairs two sinks.
    #[must_use]
    pub fn new(a: &'a mut A, b: &'a mut B) -> Self {
        Self { a, b }
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<'_, A, B> {
    fn on_selection(&mut self, e: &SelectionEvent) {
        self.a.on_selection(e);
        self.b.on_selection(e);
    }

    fn on_selection_ignored(&mut self, e: &SelectionIgnoredEvent) {
        self.a.on_selection_ignored(e);
        self.b.on_selection_ignored(e);
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.a.on_cancel(e);
        self.b.on_cancel(e);
    }

    fn on_rotation_finished(&mut self, e: &RotationFinishedEvent) {
        self.a.on_rotation_finished(e);
        self.b.on_rotation_finished(e);
    }

    fn on_label_shown(&mut self, e: &LabelShownEvent) {
        self.a.on_label_shown(e);
        self.b.on_label_shown(e);
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        self.a.on_hover(e);
        self.b.on_hover(e);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.a.on_resize(e);
        self.b.on_resize(e);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.a.on_layout(e);
        self.b.on_layout(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretty::PrettyPrintSink;
    use crate::recorder::{RecordedEvent, RecorderSink, decode};
    use timewheel_core::time::HostTime;

    #[test]
    fn tee_feeds_both_sinks() {
        let mut pretty = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut recorder = RecorderSink::new();
        let event = LabelShownEvent {
            at: HostTime::from_millis(1500),
            theme: 2,
        };
        Tee::new(&mut pretty, &mut recorder).on_label_shown(&event);

        let text = String::from_utf8(pretty.into_inner()).unwrap();
        assert_eq!(text, "[label] at 1500.0ms theme=2\n");
        let events: Vec<_> = decode(recorder.as_bytes()).collect();
        assert_eq!(events, vec![RecordedEvent::LabelShown(event)]);
    }
}
