// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Selection, pointer and layout events land on separate tracks. The ring
//! angle is also emitted as a `rotation` counter at every selection start and
//! rotation end, so the viewer plots where the ring was heading.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};
use timewheel_core::time::HostTime;

use crate::recorder::{RecordedEvent, decode};

const TID_SELECTION: u32 = 0;
const TID_POINTER: u32 = 1;
const TID_LAYOUT: u32 = 2;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are in microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Selection(e) => {
                events.push(instant(
                    "Select",
                    "Selection",
                    e.at,
                    TID_SELECTION,
                    json!({
                        "previous": e.previous,
                        "selected": e.selected,
                        "from_rotation": e.from_rotation,
                        "target_rotation": e.target_rotation,
                    }),
                ));
                events.push(rotation_counter(e.at, e.from_rotation));
            }
            RecordedEvent::SelectionIgnored(e) => {
                events.push(instant(
                    "SelectIgnored",
                    "Selection",
                    e.at,
                    TID_SELECTION,
                    json!({
                        "id": e.id,
                        "reason": format!("{:?}", e.reason),
                    }),
                ));
            }
            RecordedEvent::Cancel(e) => {
                events.push(instant(
                    "Cancel",
                    "Selection",
                    e.at,
                    TID_SELECTION,
                    json!({ "canceled": e.canceled }),
                ));
            }
            RecordedEvent::RotationFinished(e) => {
                events.push(instant(
                    "RotationFinished",
                    "Selection",
                    e.at,
                    TID_SELECTION,
                    json!({
                        "selected": e.selected,
                        "rotation": e.rotation,
                    }),
                ));
                events.push(rotation_counter(e.at, e.rotation));
            }
            RecordedEvent::LabelShown(e) => {
                events.push(instant(
                    "LabelShown",
                    "Selection",
                    e.at,
                    TID_SELECTION,
                    json!({ "theme": e.theme }),
                ));
            }
            RecordedEvent::Hover(e) => {
                events.push(instant(
                    "Hover",
                    "Pointer",
                    e.at,
                    TID_POINTER,
                    json!({
                        "previous": e.previous,
                        "hovered": e.hovered,
                    }),
                ));
            }
            RecordedEvent::Resize(e) => {
                events.push(instant(
                    "Resize",
                    "Layout",
                    e.at,
                    TID_LAYOUT,
                    json!({
                        "width": e.size.width,
                        "height": e.size.height,
                        "admission": format!("{:?}", e.admission),
                    }),
                ));
            }
            RecordedEvent::Layout(e) => {
                events.push(instant(
                    "Layout",
                    "Layout",
                    e.at,
                    TID_LAYOUT,
                    json!({
                        "width": e.size.width,
                        "height": e.size.height,
                        "circle_radius": e.circle_radius,
                        "dots": e.dots,
                        "cache_hit": e.cache_hit,
                    }),
                ));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, at: HostTime, tid: u32, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": host_us(at),
        "pid": 0,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}

fn rotation_counter(at: HostTime, degrees: f64) -> Value {
    json!({
        "ph": "C",
        "name": "rotation",
        "ts": host_us(at),
        "pid": 0,
        "tid": TID_SELECTION,
        "args": { "degrees": degrees },
    })
}

fn host_us(t: HostTime) -> f64 {
    t.nanos() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use kurbo::Size;
    use timewheel_core::throttle::Admission;
    use timewheel_core::trace::{
        HoverEvent, LayoutEvent, ResizeEvent, RotationFinishedEvent, SelectionEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_resize(&ResizeEvent {
            at: HostTime::from_millis(1),
            size: Size::new(800.0, 600.0),
            admission: Admission::Now,
        });
        rec.on_layout(&LayoutEvent {
            at: HostTime::from_millis(1),
            size: Size::new(800.0, 600.0),
            circle_radius: 180.0,
            dots: 6,
            cache_hit: false,
        });
        rec.on_selection(&SelectionEvent {
            at: HostTime::from_millis(2),
            previous: None,
            selected: 1,
            from_rotation: 0.0,
            target_rotation: 300.0,
        });
        rec.on_hover(&HoverEvent {
            at: HostTime::from_millis(3),
            previous: None,
            hovered: Some(2),
        });
        rec.on_rotation_finished(&RotationFinishedEvent {
            at: HostTime::from_millis(1002),
            selected: 1,
            rotation: 300.0,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        // Five instants plus two rotation counter samples.
        assert_eq!(parsed.len(), 7);

        assert_eq!(parsed[0]["name"], "Resize");
        assert_eq!(parsed[0]["ts"], 1000.0);
        assert_eq!(parsed[0]["args"]["admission"], "Now");

        assert_eq!(parsed[1]["name"], "Layout");
        assert_eq!(parsed[1]["tid"], TID_LAYOUT);

        assert_eq!(parsed[2]["name"], "Select");
        assert_eq!(parsed[2]["args"]["previous"], Value::Null);
        assert_eq!(parsed[3]["ph"], "C");
        assert_eq!(parsed[3]["args"]["degrees"], 0.0);

        assert_eq!(parsed[4]["name"], "Hover");
        assert_eq!(parsed[4]["tid"], TID_POINTER);

        assert_eq!(parsed[5]["name"], "RotationFinished");
        assert_eq!(parsed[6]["ph"], "C");
        assert_eq!(parsed[6]["args"]["degrees"], 300.0);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
