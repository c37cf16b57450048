// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::fmt;
use std::io::Write;

use timewheel_core::throttle::Admission;
use timewheel_core::time::HostTime;
use timewheel_core::trace::{
    CancelEvent, HoverEvent, IgnoreReason, LabelShownEvent, LayoutEvent, ResizeEvent,
    RotationFinishedEvent, SelectionEvent, SelectionIgnoredEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// `Some(3)` prints as `3`, `None` as `-`.
struct Id(Option<u32>);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("-"),
        }
    }
}

struct Ms(HostTime);

impl fmt::Display for Ms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}ms", self.0.as_millis_f64())
    }
}

fn reason_name(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::AlreadySelected => "already-selected",
        IgnoreReason::UnknownTheme => "unknown-theme",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_selection(&mut self, e: &SelectionEvent) {
        let _ = writeln!(
            self.writer,
            "[select] at {} theme={} -> {} rotation={:.1}° -> {:.1}°",
            Ms(e.at),
            Id(e.previous),
            e.selected,
            e.from_rotation,
            e.target_rotation,
        );
    }

    fn on_selection_ignored(&mut self, e: &SelectionIgnoredEvent) {
        let _ = writeln!(
            self.writer,
            "[select:ignored] at {} theme={} {}",
            Ms(e.at),
            e.id,
            reason_name(e.reason),
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        let _ = writeln!(
            self.writer,
            "[cancel] at {} tweens={}",
            Ms(e.at),
            e.canceled
        );
    }

    fn on_rotation_finished(&mut self, e: &RotationFinishedEvent) {
        let _ = writeln!(
            self.writer,
            "[rotated] at {} theme={} rotation={:.1}°",
            Ms(e.at),
            e.selected,
            e.rotation,
        );
    }

    fn on_label_shown(&mut self, e: &LabelShownEvent) {
        let _ = writeln!(self.writer, "[label] at {} theme={}", Ms(e.at), e.theme);
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        let _ = writeln!(
            self.writer,
            "[hover] at {} dot={} -> {}",
            Ms(e.at),
            Id(e.previous),
            Id(e.hovered),
        );
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let _ = match e.admission {
            Admission::Now => writeln!(
                self.writer,
                "[resize] at {} {}x{} now",
                Ms(e.at),
                e.size.width,
                e.size.height,
            ),
            Admission::Deferred { until } => writeln!(
                self.writer,
                "[resize] at {} {}x{} deferred until {}",
                Ms(e.at),
                e.size.width,
                e.size.height,
                Ms(until),
            ),
            Admission::Coalesced { until } => writeln!(
                self.writer,
                "[resize] at {} {}x{} coalesced into {}",
                Ms(e.at),
                e.size.width,
                e.size.height,
                Ms(until),
            ),
        };
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let cache = if e.cache_hit { "hit" } else { "miss" };
        let _ = writeln!(
            self.writer,
            "[layout] at {} {}x{} radius={:.1} dots={} cache={cache}",
            Ms(e.at),
            e.size.width,
            e.size.height,
            e.circle_radius,
            e.dots,
        );
    }
}
