// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level widget state.
//!
//! [`TimelineOrchestrator`] wires the pieces together: the theme catalog, the
//! resize throttle, the layout cache, the property store, an [`Animator`] and
//! the [`SelectionController`]. A host forwards viewport sizes and pointer
//! input, calls [`tick`](TimelineOrchestrator::tick) once per display frame,
//! and hands the result to a [`Presenter`].
//!
//! Every operation takes the current [`HostTime`]. Input operations first
//! bring the animator up to that time, so new tweens start when the input
//! happened rather than at the previous frame.

use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::animation::{Animator, TweenEngine, TweenEvent};
use crate::catalog::ThemeCatalog;
use crate::config::TimelineConfig;
use crate::frame::Frame;
use crate::handle::VisualHandle;
use crate::layout::{Layout, LayoutCache};
use crate::rotation::rotate_point;
use crate::selection::{HoverOutcome, SelectOutcome, SelectionController, SelectionState};
use crate::store::{FrameChanges, PropertyStore};
use crate::surface::Presenter;
use crate::throttle::{Admission, Throttle};
use crate::time::HostTime;
use crate::trace::{LayoutEvent, ResizeEvent, Tracer};

/// The timeline widget, minus rendering.
#[derive(Debug)]
pub struct TimelineOrchestrator<A: Animator = TweenEngine> {
    catalog: ThemeCatalog,
    config: TimelineConfig,
    throttle: Throttle,
    pending_size: Option<Size>,
    cache: LayoutCache,
    layout: Rc<Layout>,
    title_baseline: f64,
    store: PropertyStore,
    animator: A,
    controller: SelectionController,
    events: Vec<TweenEvent>,
    changes: FrameChanges,
}

impl TimelineOrchestrator<TweenEngine> {
    /// Creates a widget driven by the stock [`TweenEngine`].
    #[must_use]
    pub fn new(catalog: ThemeCatalog, config: TimelineConfig, now: HostTime) -> Self {
        Self::with_animator(catalog, config, TweenEngine::new(now))
    }
}

impl<A: Animator> TimelineOrchestrator<A> {
    /// Creates a widget driven by `animator`.
    ///
    /// The viewport starts unmeasured and nothing is selected; see
    /// [`resize`](Self::resize) and [`initialize`](Self::initialize).
    #[must_use]
    pub fn with_animator(catalog: ThemeCatalog, config: TimelineConfig, animator: A) -> Self {
        let dots_count = catalog.last_id();
        let mut cache = LayoutCache::default();
        let (layout, _) = cache.get_or_compute(Size::ZERO, dots_count, &config);
        let controller = SelectionController::new(dots_count, &config, layout.sizes);
        let mut store = PropertyStore::new();
        controller.seed(&mut store);
        Self {
            catalog,
            config,
            throttle: Throttle::new(config.resize.throttle_interval),
            pending_size: None,
            cache,
            layout,
            title_baseline: 0.0,
            store,
            animator,
            controller,
            events: Vec::new(),
            changes: FrameChanges::default(),
        }
    }

    /// The themes on the ring.
    #[must_use]
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The layout of the last applied viewport size.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The last applied viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.layout.size
    }

    /// When a coalesced resize will be applied, if one is pending.
    #[must_use]
    pub fn pending_resize(&self) -> Option<HostTime> {
        self.throttle.pending()
    }

    /// Selection, hover and rotation.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.controller.state()
    }

    /// The selection state machine.
    #[must_use]
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Current animated values.
    #[must_use]
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// The animator.
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// The layout cache.
    #[must_use]
    pub fn layout_cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Is any transition, fade or emphasis change still running?
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.controller.is_rotating()
            || self.controller.label_tween().is_some()
            || (0..self.catalog.last_id()).any(|index| {
                self.animator.is_animating(VisualHandle::Dot(index))
                    || self.animator.is_animating(VisualHandle::DotNumber(index))
            })
    }

    /// Reports a new container size.
    ///
    /// The first report in a quiet period is applied immediately; reports
    /// within the throttle interval after it are coalesced and the latest
    /// one is applied by [`tick`](Self::tick) when the interval ends.
    pub fn resize(&mut self, size: Size, now: HostTime, tracer: &mut Tracer<'_>) -> Admission {
        let admission = self.throttle.offer(now);
        tracer.resize(&ResizeEvent {
            at: now,
            size,
            admission,
        });
        if admission.runs_now() {
            self.pending_size = None;
            self.catch_up(now, tracer);
            self.apply_size(size, now, tracer);
        } else {
            self.pending_size = Some(size);
        }
        admission
    }

    /// Sets the vertical position of the title block.
    pub fn set_title_baseline(&mut self, y: f64) {
        if self.title_baseline != y {
            self.title_baseline = y;
            self.store.mark_layout(VisualHandle::Ring);
        }
    }

    /// Selects the first theme if nothing is selected yet.
    pub fn initialize(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Option<SelectOutcome> {
        if self.controller.selected().is_some() {
            return None;
        }
        let first = self.catalog.first().id;
        Some(self.select_theme(first, now, tracer))
    }

    /// Starts a transition to theme `id`.
    pub fn select_theme(&mut self, id: u32, now: HostTime, tracer: &mut Tracer<'_>) -> SelectOutcome {
        self.catch_up(now, tracer);
        self.controller
            .select_theme(id, now, &mut self.animator, &mut self.store, tracer)
    }

    /// Selects the following theme, wrapping from the last to the first.
    pub fn select_next(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> SelectOutcome {
        let id = self
            .controller
            .selected()
            .and_then(|id| self.catalog.next_id(id))
            .unwrap_or(self.catalog.first().id);
        self.select_theme(id, now, tracer)
    }

    /// Selects the preceding theme, wrapping from the first to the last.
    pub fn select_previous(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> SelectOutcome {
        let id = self
            .controller
            .selected()
            .and_then(|id| self.catalog.prev_id(id))
            .unwrap_or(self.catalog.first().id);
        self.select_theme(id, now, tracer)
    }

    /// Turns the ring to `degrees` at once, abandoning a rotation in progress.
    pub fn set_rotation(&mut self, degrees: f64, now: HostTime, tracer: &mut Tracer<'_>) {
        self.catch_up(now, tracer);
        self.controller
            .set_rotation(degrees, &mut self.animator, &mut self.store);
    }

    /// Highlights dot `id`.
    pub fn hover_dot(&mut self, id: u32, now: HostTime, tracer: &mut Tracer<'_>) -> HoverOutcome {
        self.catch_up(now, tracer);
        self.controller
            .hover_dot(id, now, &mut self.animator, tracer)
    }

    /// Clears the hover highlight.
    pub fn unhover_dot(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> HoverOutcome {
        self.catch_up(now, tracer);
        self.controller.unhover_dot(now, &mut self.animator, tracer)
    }

    /// The interactive dot under `point`, if any.
    ///
    /// Every dot is hit within the selected dot radius of its rotated center;
    /// the closest one wins. The selected dot never reacts to the pointer.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<u32> {
        if !self.layout.is_measured() {
            return None;
        }
        let center = self.layout.geometry.center;
        let rotation = self.controller.rotation();
        let radius = self.layout.sizes.selected_dot_radius;
        self.layout
            .dots
            .iter()
            .filter(|dot| self.controller.selected() != Some(dot.id))
            .map(|dot| {
                let position = rotate_point(dot.position, center, rotation);
                (dot.id, position.distance(point))
            })
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Updates hover from a pointer position.
    pub fn pointer_moved(
        &mut self,
        point: Point,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> HoverOutcome {
        match self.hit_test(point) {
            Some(id) => self.hover_dot(id, now, tracer),
            None => self.unhover_dot(now, tracer),
        }
    }

    /// Selects the dot under `point`, if any.
    pub fn click(
        &mut self,
        point: Point,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Option<SelectOutcome> {
        let id = self.hit_test(point)?;
        Some(self.select_theme(id, now, tracer))
    }

    /// Advances the widget to `now`.
    ///
    /// Applies a due coalesced resize, advances every tween and routes their
    /// progress to the selection controller. Returns whether anything is
    /// still animating.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        self.catch_up(now, tracer);
        if self.throttle.poll(now)
            && let Some(size) = self.pending_size.take()
        {
            self.apply_size(size, now, tracer);
        }
        self.is_animating()
    }

    /// A snapshot for drawing, or `None` while the viewport is unmeasured.
    #[must_use]
    pub fn frame(&self) -> Option<Frame<'_>> {
        if !self.layout.is_measured() {
            return None;
        }
        Some(Frame::build(
            &self.layout,
            &self.controller,
            &self.store,
            &self.catalog,
            &self.config,
            self.title_baseline,
        ))
    }

    /// Drains the dirty channels and hands the current frame to `presenter`.
    ///
    /// Returns `false` (and presents nothing) while the viewport is
    /// unmeasured.
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> bool {
        self.store.evaluate_into(&mut self.changes);
        match self.frame() {
            Some(frame) => {
                presenter.present(&frame, &self.changes);
                true
            }
            None => false,
        }
    }

    fn catch_up(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.events.clear();
        self.animator.advance(now, &mut self.store, &mut self.events);
        self.controller
            .handle_events(&self.events, now, &mut self.animator, tracer);
    }

    fn apply_size(&mut self, size: Size, now: HostTime, tracer: &mut Tracer<'_>) {
        let dots_count = self.catalog.last_id();
        let (layout, cache_hit) = self.cache.get_or_compute(size, dots_count, &self.config);
        self.controller
            .apply_sizes(layout.sizes, &mut self.animator, &mut self.store);
        self.store.mark_layout(VisualHandle::Ring);
        self.store.mark_layout(VisualHandle::ThemeLabel);
        for index in 0..dots_count {
            self.store.mark_layout(VisualHandle::Dot(index));
        }
        tracer.layout(&LayoutEvent {
            at: now,
            size,
            circle_radius: layout.geometry.circle_radius,
            dots: layout.dots.len(),
            cache_hit,
        });
        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample;
    use crate::selection::Phase;
    use alloc::string::ToString;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn timeline(dots: u32) -> TimelineOrchestrator {
        TimelineOrchestrator::new(sample(dots), TimelineConfig::standard(), ms(0))
    }

    /// Ticks at 60 Hz from `from` to `to` inclusive.
    fn run(t: &mut TimelineOrchestrator, from: u64, to: u64) {
        let mut now = from;
        while now < to {
            t.tick(ms(now), &mut Tracer::none());
            now += 16;
        }
        t.tick(ms(to), &mut Tracer::none());
    }

    /// Measured, initialized and settled on the first theme.
    fn settled(dots: u32) -> TimelineOrchestrator {
        let mut t = timeline(dots);
        t.resize(Size::new(1200.0, 800.0), ms(0), &mut Tracer::none());
        t.initialize(ms(0), &mut Tracer::none());
        run(&mut t, 0, 2000);
        t
    }

    #[derive(Default)]
    struct RecordingPresenter {
        frames: usize,
        last_changes: FrameChanges,
        last_counter: Option<alloc::string::String>,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, frame: &Frame<'_>, changes: &FrameChanges) {
            self.frames += 1;
            self.last_changes = changes.clone();
            self.last_counter = Some(frame.counter.to_string());
        }
    }

    #[test]
    fn unmeasured_viewport_has_no_frame() {
        let mut t = timeline(6);
        assert!(t.frame().is_none());
        assert_eq!(t.hit_test(Point::new(10.0, 10.0)), None);

        let mut presenter = RecordingPresenter::default();
        assert!(!t.present(&mut presenter));
        assert_eq!(presenter.frames, 0);

        assert_eq!(
            t.resize(Size::new(800.0, 600.0), ms(0), &mut Tracer::none()),
            Admission::Now
        );
        assert!(t.frame().is_some());
    }

    #[test]
    fn resize_bursts_apply_the_latest_size_once() {
        let mut t = timeline(6);
        let first = Size::new(800.0, 600.0);
        let last = Size::new(1024.0, 768.0);
        t.resize(first, ms(0), &mut Tracer::none());
        assert_eq!(
            t.resize(Size::new(900.0, 700.0), ms(100), &mut Tracer::none()),
            Admission::Deferred { until: ms(400) }
        );
        assert_eq!(
            t.resize(last, ms(200), &mut Tracer::none()),
            Admission::Coalesced { until: ms(400) }
        );
        assert_eq!(t.pending_resize(), Some(ms(400)));

        t.tick(ms(399), &mut Tracer::none());
        assert_eq!(t.viewport(), first);
        t.tick(ms(400), &mut Tracer::none());
        assert_eq!(t.viewport(), last);
        assert_eq!(t.pending_resize(), None);
        assert_eq!(t.layout_cache().misses(), 3, "zero size, first and last");
    }

    #[test]
    fn initialize_selects_the_first_theme_once() {
        let mut t = timeline(6);
        assert!(matches!(
            t.initialize(ms(0), &mut Tracer::none()),
            Some(SelectOutcome::Started { .. })
        ));
        assert_eq!(t.selection().selected, Some(1));
        assert_eq!(t.initialize(ms(10), &mut Tracer::none()), None);
    }

    #[test]
    fn navigation_wraps_around() {
        let mut t = settled(6);
        t.select_previous(ms(2000), &mut Tracer::none());
        assert_eq!(t.selection().selected, Some(6));
        t.select_next(ms(2100), &mut Tracer::none());
        assert_eq!(t.selection().selected, Some(1));
        t.select_next(ms(2200), &mut Tracer::none());
        assert_eq!(t.selection().selected, Some(2));
    }

    #[test]
    fn settled_frame_shows_the_selected_theme() {
        let t = settled(6);
        assert!(!t.is_animating());
        let frame = t.frame().unwrap();
        assert_eq!(frame.rotation, 300.0);
        assert_eq!(frame.counter.to_string(), "01/06");
        assert_eq!(frame.dots.len(), 6);
        assert_eq!(frame.facts.len(), 1);

        let label = frame.label.unwrap();
        assert_eq!(label.text, "Theme 1");
        assert_eq!(label.opacity, 1.0);

        let period = frame.period.unwrap();
        assert_eq!(period.start, 1910);
        assert_eq!(
            period.end_position.x - period.start_position.x,
            2.0 * (frame.geometry.circle_radius - t.config().label.period_offset_x)
        );

        let selected = frame.dot(1).unwrap();
        assert!(!selected.interactive);
        assert_eq!(selected.style.radius, frame.sizes.selected_dot_radius);
        assert!(frame.dot(2).unwrap().interactive);
    }

    #[test]
    fn hit_testing_follows_the_rotated_dots() {
        let mut t = settled(6);
        let (selected_at, other_at) = {
            let frame = t.frame().unwrap();
            (frame.dot(1).unwrap().position, frame.dot(4).unwrap().position)
        };

        assert_eq!(t.hit_test(selected_at), None, "selected dot is inert");
        assert_eq!(t.hit_test(other_at), Some(4));
        assert_eq!(t.hit_test(Point::new(-500.0, -500.0)), None);

        assert_eq!(
            t.pointer_moved(other_at, ms(2000), &mut Tracer::none()),
            HoverOutcome::Changed
        );
        assert_eq!(t.selection().hovered, Some(4));
        assert_eq!(
            t.pointer_moved(Point::ZERO, ms(2010), &mut Tracer::none()),
            HoverOutcome::Changed
        );
        assert_eq!(t.selection().hovered, None);

        assert!(matches!(
            t.click(other_at, ms(2020), &mut Tracer::none()),
            Some(SelectOutcome::Started { .. })
        ));
        assert_eq!(t.selection().selected, Some(4));
        assert!(matches!(t.controller().phase(), Phase::Rotating { .. }));
    }

    #[test]
    fn rotation_is_continuous_across_ticks() {
        let mut t = timeline(6);
        t.resize(Size::new(1200.0, 800.0), ms(0), &mut Tracer::none());
        t.initialize(ms(0), &mut Tracer::none());
        let mut previous = t.selection().rotation;
        for now in (16..1000).step_by(16) {
            assert!(t.tick(ms(now), &mut Tracer::none()));
            let rotation = t.selection().rotation;
            assert!(rotation >= previous, "rotation went backwards at {now}ms");
            previous = rotation;
        }
        run(&mut t, 1000, 1600);
        assert_eq!(t.selection().rotation, 300.0);
        assert!(!t.is_animating());
    }

    #[test]
    fn resize_settles_finished_tweens_before_resizing_dots() {
        let mut t = settled(6);
        t.select_theme(3, ms(2000), &mut Tracer::none());
        let before = t.layout().sizes;

        // The 300 ms dot tweens ended at 2300 ms; no tick has observed it.
        assert_eq!(
            t.resize(Size::new(500.0, 400.0), ms(2400), &mut Tracer::none()),
            Admission::Now
        );
        let sizes = t.layout().sizes;
        assert_ne!(sizes, before);
        assert!(!t.animator().is_animating(VisualHandle::Dot(0)));
        assert_eq!(t.store().dot_style(0).unwrap().radius, sizes.dot_radius);
    }

    #[test]
    fn set_rotation_abandons_the_transition() {
        let mut t = timeline(6);
        t.resize(Size::new(1200.0, 800.0), ms(0), &mut Tracer::none());
        t.initialize(ms(0), &mut Tracer::none());
        run(&mut t, 0, 300);
        assert!(t.controller().is_rotating());

        t.set_rotation(90.0, ms(300), &mut Tracer::none());
        run(&mut t, 300, 2000);
        assert_eq!(t.selection().rotation, 90.0);
        assert_eq!(t.frame().unwrap().rotation, 90.0);
        assert_eq!(t.frame().unwrap().label.unwrap().opacity, 1.0);
    }

    #[test]
    fn present_reports_only_what_changed() {
        let mut t = settled(6);
        let mut presenter = RecordingPresenter::default();
        assert!(t.present(&mut presenter));
        assert_eq!(presenter.last_counter.as_deref(), Some("01/06"));
        assert!(!presenter.last_changes.layout.is_empty());

        assert!(t.present(&mut presenter));
        assert!(presenter.last_changes.is_empty());

        t.select_theme(3, ms(2000), &mut Tracer::none());
        t.tick(ms(2100), &mut Tracer::none());
        t.present(&mut presenter);
        assert_eq!(presenter.last_changes.transforms, [VisualHandle::Ring]);
        assert!(
            presenter
                .last_changes
                .opacities
                .contains(&VisualHandle::ThemeLabel)
        );
        assert_eq!(presenter.frames, 3);
    }
}
