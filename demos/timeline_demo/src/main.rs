// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted timeline session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a [`TimelineOrchestrator`] through a resize burst, the initial
//! selection, an interrupted rotation, pointer hover and click, and keyboard
//! navigation, at a simulated 60 Hz. Events go to both a
//! [`PrettyPrintSink`] (stdout) and a [`RecorderSink`]; the recording is then
//! exported as Chrome trace JSON.
//!
//! Usage: `timeline_demo [trace.json] [themes.json]`

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use kurbo::Size;
use timewheel_core::config::TimelineConfig;
use timewheel_core::frame::Frame;
use timewheel_core::orchestrator::TimelineOrchestrator;
use timewheel_core::store::FrameChanges;
use timewheel_core::surface::Presenter;
use timewheel_core::time::HostTime;
use timewheel_core::trace::Tracer;

use timewheel_debug::Tee;
use timewheel_debug::pretty::PrettyPrintSink;
use timewheel_debug::recorder::RecorderSink;

/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;

/// Prints a line whenever the counter or the label text changes.
#[derive(Debug, Default)]
struct ConsolePresenter {
    frames: usize,
    updates: usize,
    last: Option<(String, Option<String>)>,
}

impl Presenter for ConsolePresenter {
    fn present(&mut self, frame: &Frame<'_>, changes: &FrameChanges) {
        self.frames += 1;
        if !changes.is_empty() {
            self.updates += 1;
        }
        let visible = frame
            .label
            .filter(|label| label.opacity >= 1.0)
            .map(|label| label.text.to_owned());
        let state = (frame.counter.to_string(), visible);
        if self.last.as_ref() != Some(&state) {
            println!(
                "  [frame] {} label={} rotation={:.1}° facts={}",
                state.0,
                state.1.as_deref().unwrap_or("-"),
                frame.rotation,
                frame.facts.len(),
            );
            self.last = Some(state);
        }
    }
}

/// Simulated monotonic clock.
#[derive(Debug)]
struct Clock {
    now: u64,
}

impl Clock {
    fn now(&self) -> HostTime {
        HostTime(self.now)
    }

    fn advance_ms(&mut self, millis: u64) -> HostTime {
        self.now += millis * 1_000_000;
        self.now()
    }
}

/// Ticks and presents every refresh interval for `millis`.
fn run_for(
    timeline: &mut TimelineOrchestrator,
    presenter: &mut ConsolePresenter,
    clock: &mut Clock,
    tracer: &mut Tracer<'_>,
    millis: u64,
) {
    let end = clock.now + millis * 1_000_000;
    while clock.now < end {
        clock.now = (clock.now + REFRESH_INTERVAL_NS).min(end);
        timeline.tick(clock.now(), tracer);
        timeline.present(presenter);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let trace_path = args.next().unwrap_or_else(|| "trace.json".to_owned());
    let catalog = match args.next() {
        Some(path) => timewheel_catalog::from_path(path)?,
        None => timewheel_catalog::bundled()?,
    };
    let theme_count = catalog.len();

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- widget ------------------------------------------------------------
    let mut clock = Clock {
        now: 1_000_000_000, // start at 1s
    };
    let mut timeline = TimelineOrchestrator::new(catalog, TimelineConfig::standard(), clock.now());
    let mut presenter = ConsolePresenter::default();

    {
        let mut tee = Tee::new(&mut pretty, &mut recorder);
        let mut tracer = Tracer::new(&mut tee);

        // Window opening: a burst of sizes inside one throttle interval.
        timeline.resize(Size::new(800.0, 600.0), clock.now(), &mut tracer);
        let now = clock.advance_ms(40);
        timeline.resize(Size::new(1024.0, 700.0), now, &mut tracer);
        let now = clock.advance_ms(40);
        timeline.resize(Size::new(1280.0, 800.0), now, &mut tracer);
        timeline.set_title_baseline(96.0);

        timeline.initialize(clock.now(), &mut tracer);
        run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 400);

        // Reselect while the ring is still turning.
        timeline.select_theme(4, clock.now(), &mut tracer);
        run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 1800);

        // Pointer over the neighbouring dot, then click it.
        let target = timeline
            .frame()
            .and_then(|frame| frame.dot(5).map(|dot| dot.position));
        if let Some(point) = target {
            timeline.pointer_moved(point, clock.now(), &mut tracer);
            run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 200);
            timeline.click(point, clock.now(), &mut tracer);
            run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 1800);
        }

        // Keyboard navigation, including a wrap past the last theme.
        timeline.select_next(clock.now(), &mut tracer);
        run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 1800);
        timeline.select_next(clock.now(), &mut tracer);
        run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 1800);
        timeline.select_previous(clock.now(), &mut tracer);
        run_for(&mut timeline, &mut presenter, &mut clock, &mut tracer, 1800);

        // Ignored requests.
        if let Some(current) = timeline.selection().selected {
            timeline.select_theme(current, clock.now(), &mut tracer);
        }
        timeline.select_theme(99, clock.now(), &mut tracer);
    }

    // -- export Chrome trace -----------------------------------------------
    let file = File::create(&trace_path)?;
    let mut writer = BufWriter::new(file);
    timewheel_debug::chrome::export(recorder.as_bytes(), &mut writer)?;

    let cache = timeline.layout_cache();
    println!(
        "Wrote {trace_path} ({theme_count} themes, {} frames, {} with changes, \
         layout cache {} hits / {} misses)",
        presenter.frames,
        presenter.updates,
        cache.hits(),
        cache.misses(),
    );
    Ok(())
}
