// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Floats are stored as their IEEE-754 bits, so decoding is lossless.
//! Counts are stored as `u32` and saturate.

use std::iter::FusedIterator;

use kurbo::Size;
use timewheel_core::throttle::Admission;
use timewheel_core::time::HostTime;
use timewheel_core::trace::{
    CancelEvent, HoverEvent, IgnoreReason, LabelShownEvent, LayoutEvent, ResizeEvent,
    RotationFinishedEvent, SelectionEvent, SelectionIgnoredEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SELECTION: u8 = 1;
const TAG_SELECTION_IGNORED: u8 = 2;
const TAG_CANCEL: u8 = 3;
const TAG_ROTATION_FINISHED: u8 = 4;
const TAG_LABEL_SHOWN: u8 = 5;
const TAG_HOVER: u8 = 6;
const TAG_RESIZE: u8 = 7;
const TAG_LAYOUT: u8 = 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_time(&mut self, t: HostTime) {
        self.write_u64(t.nanos());
    }

    fn write_count(&mut self, n: usize) {
        self.write_u32(u32::try_from(n).unwrap_or(u32::MAX));
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u32(val);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }

    fn write_size(&mut self, size: Size) {
        self.write_f64(size.width);
        self.write_f64(size.height);
    }

    fn write_admission(&mut self, admission: Admission) {
        let (kind, until) = match admission {
            Admission::Now => (0, HostTime(0)),
            Admission::Deferred { until } => (1, until),
            Admission::Coalesced { until } => (2, until),
        };
        self.write_u8(kind);
        self.write_time(until);
    }
}

impl TraceSink for RecorderSink {
    fn on_selection(&mut self, e: &SelectionEvent) {
        self.write_u8(TAG_SELECTION);
        self.write_time(e.at);
        self.write_option_u32(e.previous);
        self.write_u32(e.selected);
        self.write_f64(e.from_rotation);
        self.write_f64(e.target_rotation);
    }

    fn on_selection_ignored(&mut self, e: &SelectionIgnoredEvent) {
        self.write_u8(TAG_SELECTION_IGNORED);
        self.write_time(e.at);
        self.write_u32(e.id);
        self.write_u8(match e.reason {
            IgnoreReason::AlreadySelected => 0,
            IgnoreReason::UnknownTheme => 1,
        });
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.write_u8(TAG_CANCEL);
        self.write_time(e.at);
        self.write_count(e.canceled);
    }

    fn on_rotation_finished(&mut self, e: &RotationFinishedEvent) {
        self.write_u8(TAG_ROTATION_FINISHED);
        self.write_time(e.at);
        self.write_u32(e.selected);
        self.write_f64(e.rotation);
    }

    fn on_label_shown(&mut self, e: &LabelShownEvent) {
        self.write_u8(TAG_LABEL_SHOWN);
        self.write_time(e.at);
        self.write_u32(e.theme);
    }

    fn on_hover(&mut self, e: &HoverEvent) {
        self.write_u8(TAG_HOVER);
        self.write_time(e.at);
        self.write_option_u32(e.previous);
        self.write_option_u32(e.hovered);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.write_u8(TAG_RESIZE);
        self.write_time(e.at);
        self.write_size(e.size);
        self.write_admission(e.admission);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_time(e.at);
        self.write_size(e.size);
        self.write_f64(e.circle_radius);
        self.write_count(e.dots);
        self.write_u8(u8::from(e.cache_hit));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SelectionEvent`].
    Selection(SelectionEvent),
    /// A [`SelectionIgnoredEvent`].
    SelectionIgnored(SelectionIgnoredEvent),
    /// A [`CancelEvent`].
    Cancel(CancelEvent),
    /// A [`RotationFinishedEvent`].
    RotationFinished(RotationFinishedEvent),
    /// A [`LabelShownEvent`].
    LabelShown(LabelShownEvent),
    /// A [`HoverEvent`].
    Hover(HoverEvent),
    /// A [`ResizeEvent`].
    Resize(ResizeEvent),
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
}

impl RecordedEvent {
    /// When the event happened.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Selection(e) => e.at,
            Self::SelectionIgnored(e) => e.at,
            Self::Cancel(e) => e.at,
            Self::RotationFinished(e) => e.at,
            Self::LabelShown(e) => e.at,
            Self::Hover(e) => e.at,
            Self::Resize(e) => e.at,
            Self::Layout(e) => e.at,
        }
    }

    /// Replays the event into another sink.
    pub fn replay(&self, sink: &mut dyn TraceSink) {
        match self {
            Self::Selection(e) => sink.on_selection(e),
            Self::SelectionIgnored(e) => sink.on_selection_ignored(e),
            Self::Cancel(e) => sink.on_cancel(e),
            Self::RotationFinished(e) => sink.on_rotation_finished(e),
            Self::LabelShown(e) => sink.on_label_shown(e),
            Self::Hover(e) => sink.on_hover(e),
            Self::Resize(e) => sink.on_resize(e),
            Self::Layout(e) => sink.on_layout(e),
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag, unknown enum value, or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_count(&mut self) -> Option<usize> {
        self.read_u32().and_then(|n| usize::try_from(n).ok())
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_u8()?;
        let val = self.read_u32()?;
        Some((present != 0).then_some(val))
    }

    fn read_size(&mut self) -> Option<Size> {
        Some(Size::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_admission(&mut self) -> Option<Admission> {
        let kind = self.read_u8()?;
        let until = self.read_time()?;
        match kind {
            0 => Some(Admission::Now),
            1 => Some(Admission::Deferred { until }),
            2 => Some(Admission::Coalesced { until }),
            _ => None,
        }
    }

    fn decode_selection(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Selection(SelectionEvent {
            at: self.read_time()?,
            previous: self.read_option_u32()?,
            selected: self.read_u32()?,
            from_rotation: self.read_f64()?,
            target_rotation: self.read_f64()?,
        }))
    }

    fn decode_selection_ignored(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SelectionIgnored(SelectionIgnoredEvent {
            at: self.read_time()?,
            id: self.read_u32()?,
            reason: match self.read_u8()? {
                0 => IgnoreReason::AlreadySelected,
                1 => IgnoreReason::UnknownTheme,
                _ => return None,
            },
        }))
    }

    fn decode_cancel(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Cancel(CancelEvent {
            at: self.read_time()?,
            canceled: self.read_count()?,
        }))
    }

    fn decode_rotation_finished(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RotationFinished(RotationFinishedEvent {
            at: self.read_time()?,
            selected: self.read_u32()?,
            rotation: self.read_f64()?,
        }))
    }

    fn decode_label_shown(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LabelShown(LabelShownEvent {
            at: self.read_time()?,
            theme: self.read_u32()?,
        }))
    }

    fn decode_hover(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Hover(HoverEvent {
            at: self.read_time()?,
            previous: self.read_option_u32()?,
            hovered: self.read_option_u32()?,
        }))
    }

    fn decode_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resize(ResizeEvent {
            at: self.read_time()?,
            size: self.read_size()?,
            admission: self.read_admission()?,
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            at: self.read_time()?,
            size: self.read_size()?,
            circle_radius: self.read_f64()?,
            dots: self.read_count()?,
            cache_hit: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let event = match tag {
            TAG_SELECTION => self.decode_selection(),
            TAG_SELECTION_IGNORED => self.decode_selection_ignored(),
            TAG_CANCEL => self.decode_cancel(),
            TAG_ROTATION_FINISHED => self.decode_rotation_finished(),
            TAG_LABEL_SHOWN => self.decode_label_shown(),
            TAG_HOVER => self.decode_hover(),
            TAG_RESIZE => self.decode_resize(),
            TAG_LAYOUT => self.decode_layout(),
            _ => None, // unknown tag → stop iteration
        };
        if event.is_none() {
            // A bad record ends the stream.
            self.pos = self.data.len();
        }
        event
    }
}

impl FusedIterator for DecodeIter<'_> {}

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
            selected: 4,
            from_rotation: 300.0,
            target_rotation: 120.0,
        }
    }

    fn sample_layout() -> LayoutEvent {
        LayoutEvent {
            at: HostTime::from_millis(250),
            size: Size::new(1440.0, 900.0),
            circle_radius: 265.0,
            dots: 6,
            cache_hit: true,
        }
    }

    #[test]
    fn selection_decodes_losslessly() {
        let mut rec = RecorderSink::new();
        rec.on_selection(&sample_selection());

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events, vec![RecordedEvent::Selection(sample_selection())]);
    }

    #[test]
    fn first_selection_has_no_previous() {
        let mut rec = RecorderSink::new();
        let first = SelectionEvent {
            previous: None,
            ..sample_selection()
        };
        rec.on_selection(&first);

        match decode(rec.as_bytes()).next() {
            Some(RecordedEvent::Selection(e)) => assert_eq!(e.previous, None),
            other => panic!("expected Selection, got {other:?}"),
        }
    }

    #[test]
    fn resize_keeps_admission_and_deadline() {
        let mut rec = RecorderSink::new();
        let admissions = [
            Admission::Now,
            Admission::Deferred {
                until: HostTime::from_millis(300),
            },
            Admission::Coalesced {
                until: HostTime::from_millis(300),
            },
        ];
        for admission in admissions {
            rec.on_resize(&ResizeEvent {
                at: HostTime::from_millis(100),
                size: Size::new(800.0, 600.0),
                admission,
            });
        }

        let decoded: Vec<_> = decode(rec.as_bytes())
            .map(|event| match event {
                RecordedEvent::Resize(e) => e.admission,
                other => panic!("expected Resize, got {other:?}"),
            })
            .collect();
        assert_eq!(decoded, admissions);
    }

    #[test]
    fn mixed_stream_keeps_order() {
        let mut rec = RecorderSink::new();
        rec.on_layout(&sample_layout());
        rec.on_cancel(&CancelEvent {
            at: HostTime::from_millis(260),
            canceled: 9,
        });
        rec.on_selection(&sample_selection());
        rec.on_hover(&HoverEvent {
            at: HostTime::from_millis(270),
            previous: None,
            hovered: Some(2),
        });
        rec.on_selection_ignored(&SelectionIgnoredEvent {
            at: HostTime::from_millis(280),
            id: 9,
            reason: IgnoreReason::UnknownTheme,
        });
        rec.on_rotation_finished(&RotationFinishedEvent {
            at: HostTime::from_millis(1260),
            selected: 4,
            rotation: 120.0,
        });
        rec.on_label_shown(&LabelShownEvent {
            at: HostTime::from_millis(1560),
            theme: 4,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 7);
        assert!(matches!(events[0], RecordedEvent::Layout(_)));
        assert!(matches!(events[1], RecordedEvent::Cancel(CancelEvent { canceled: 9, .. })));
        assert!(matches!(events[2], RecordedEvent::Selection(_)));
        assert!(matches!(events[3], RecordedEvent::Hover(_)));
        assert!(matches!(
            events[4],
            RecordedEvent::SelectionIgnored(SelectionIgnoredEvent {
                reason: IgnoreReason::UnknownTheme,
                ..
            })
        ));
        assert!(matches!(events[5], RecordedEvent::RotationFinished(_)));
        assert!(matches!(events[6], RecordedEvent::LabelShown(LabelShownEvent { theme: 4, .. })));
        assert!(events.windows(2).all(|w| w[0].at() <= w[1].at()));
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_layout(&sample_layout());
        rec.on_selection(&sample_selection());
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events, vec![RecordedEvent::Layout(sample_layout())]);
    }

    #[test]
    fn unknown_enum_values_stop_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_layout(&sample_layout());
        rec.on_selection_ignored(&SelectionIgnoredEvent {
            at: HostTime::from_millis(300),
            id: 2,
            reason: IgnoreReason::AlreadySelected,
        });
        let mut bytes = rec.into_bytes();
        // The reason is the last byte of the ignored-selection record.
        let last = bytes.len() - 1;
        bytes[last] = 7;
        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(events, vec![RecordedEvent::Layout(sample_layout())]);

        let mut rec = RecorderSink::new();
        rec.on_resize(&ResizeEvent {
            at: HostTime::from_millis(100),
            size: Size::new(800.0, 600.0),
            admission: Admission::Now,
        });
        let mut bytes = rec.into_bytes();
        // Tag, time and two size floats precede the admission kind.
        bytes[1 + 8 + 8 + 8] = 3;
        let mut events = decode(&bytes);
        assert_eq!(events.next(), None);
        assert_eq!(events.next(), None);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn replay_feeds_another_recorder() {
        let mut rec = RecorderSink::new();
        rec.on_selection(&sample_selection());
        rec.on_layout(&sample_layout());

        let mut copy = RecorderSink::new();
        for event in decode(rec.as_bytes()) {
            event.replay(&mut copy);
        }
        assert_eq!(copy.as_bytes(), rec.as_bytes());
    }
}
