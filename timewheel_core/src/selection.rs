// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection transition state machine.
//!
//! [`SelectionController`] owns the selected and hovered theme and the ring
//! rotation. A selection change runs in a fixed order:
//!
//! 1. every running tween of the ring, the dots and the theme label is
//!    canceled, and the ids of the rotation and label tweens are forgotten;
//! 2. hover is cleared and the target rotation computed;
//! 3. the theme label is hidden instantly;
//! 4. each dot animates to its new emphasis;
//! 5. the ring rotates from its current angle to the target, reporting every
//!    intermediate value;
//! 6. when the rotation completes, the label fades in.
//!
//! Progress comes back through [`SelectionController::handle_events`]. Events
//! are matched against the tween ids the controller still tracks, so a
//! completion from a canceled or superseded transition is dropped.

use alloc::vec::Vec;

use crate::animation::{Animator, TweenEvent, TweenId, TweenSpec};
use crate::config::{AnimationConfig, Palette, TimelineConfig};
use crate::handle::VisualHandle;
use crate::rotation::calculate_rotation;
use crate::store::{Property, PropertyStore, Value};
use crate::style::{DotStyle, Emphasis, Sizes};
use crate::time::HostTime;
use crate::trace::{
    CancelEvent, HoverEvent, IgnoreReason, LabelShownEvent, RotationFinishedEvent,
    SelectionEvent, SelectionIgnoredEvent, Tracer,
};

/// Selection, hover and rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionState {
    /// The selected theme id.
    pub selected: Option<u32>,
    /// The hovered dot id.
    pub hovered: Option<u32>,
    /// Current ring rotation in degrees.
    pub rotation: f64,
}

/// Where the controller is in a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Phase {
    /// Nothing is rotating; the label is shown or fading in.
    #[default]
    Idle,
    /// The ring is turning towards the selected dot.
    Rotating {
        /// Rotation when the transition started.
        from: f64,
        /// Target rotation.
        to: f64,
        /// When the transition started.
        started_at: HostTime,
    },
}

/// Result of [`SelectionController::select_theme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectOutcome {
    /// A transition started.
    Started {
        /// Rotation the ring is heading to.
        target_rotation: f64,
        /// Tweens of the previous transition that were canceled.
        canceled: usize,
    },
    /// The theme was already selected; nothing happened.
    AlreadySelected,
    /// No theme has this id; nothing happened.
    UnknownTheme,
}

/// Result of a hover change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The hovered dot changed.
    Changed,
    /// The dot was already hovered (or nothing was hovered on leave).
    Unchanged,
    /// The selected dot does not react to hover.
    SuppressedOnSelection,
    /// No dot has this id.
    UnknownDot,
}

/// Coordinates selection changes with rotation and emphasis animations.
#[derive(Clone, Debug)]
pub struct SelectionController {
    dots_count: u32,
    state: SelectionState,
    phase: Phase,
    rotation_tween: Option<TweenId>,
    label_tween: Option<TweenId>,
    animation: AnimationConfig,
    palette: Palette,
    sizes: Sizes,
}

impl SelectionController {
    /// Creates a controller for `dots_count` dots with nothing selected.
    #[must_use]
    pub fn new(dots_count: u32, config: &TimelineConfig, sizes: Sizes) -> Self {
        Self {
            dots_count,
            state: SelectionState::default(),
            phase: Phase::Idle,
            rotation_tween: None,
            label_tween: None,
            animation: config.animation,
            palette: config.palette,
            sizes,
        }
    }

    /// Number of dots on the ring.
    #[must_use]
    pub fn dots_count(&self) -> u32 {
        self.dots_count
    }

    /// Selection, hover and rotation.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The selected theme id.
    #[must_use]
    pub fn selected(&self) -> Option<u32> {
        self.state.selected
    }

    /// The hovered dot id.
    #[must_use]
    pub fn hovered(&self) -> Option<u32> {
        self.state.hovered
    }

    /// Current ring rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.state.rotation
    }

    /// Is the ring turning?
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        matches!(self.phase, Phase::Rotating { .. })
    }

    /// The rotation tween this controller listens to.
    #[must_use]
    pub fn rotation_tween(&self) -> Option<TweenId> {
        self.rotation_tween
    }

    /// The label fade tween this controller listens to.
    #[must_use]
    pub fn label_tween(&self) -> Option<TweenId> {
        self.label_tween
    }

    /// Sizes the dot styles are derived from.
    #[must_use]
    pub fn sizes(&self) -> &Sizes {
        &self.sizes
    }

    /// The emphasis of dot `id` right now.
    #[must_use]
    pub fn emphasis(&self, id: u32) -> Emphasis {
        Emphasis::of(id, self.state.selected, self.state.hovered)
    }

    /// Writes the resting values of every element into `store`.
    pub fn seed(&self, store: &mut PropertyStore) {
        store.set(
            VisualHandle::Ring,
            Property::Rotation,
            Value::Scalar(self.state.rotation),
        );
        store.set(
            VisualHandle::ThemeLabel,
            Property::Opacity,
            Value::Scalar(self.resting_label_opacity()),
        );
        for index in 0..self.dots_count {
            let style = DotStyle::for_emphasis(self.emphasis(index + 1), &self.sizes, &self.palette);
            store.set_dot_style(index, &style);
        }
    }

    /// Starts a transition to theme `id`.
    pub fn select_theme<A: Animator + ?Sized>(
        &mut self,
        id: u32,
        now: HostTime,
        animator: &mut A,
        store: &mut PropertyStore,
        tracer: &mut Tracer<'_>,
    ) -> SelectOutcome {
        let reason = if !self.is_dot(id) {
            Some(IgnoreReason::UnknownTheme)
        } else if self.state.selected == Some(id) {
            Some(IgnoreReason::AlreadySelected)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracer.selection_ignored(&SelectionIgnoredEvent { at: now, id, reason });
            return match reason {
                IgnoreReason::AlreadySelected => SelectOutcome::AlreadySelected,
                IgnoreReason::UnknownTheme => SelectOutcome::UnknownTheme,
            };
        }

        let canceled = animator.cancel(&self.all_handles());
        self.rotation_tween = None;
        self.label_tween = None;
        if canceled > 0 {
            tracer.cancel(&CancelEvent { at: now, canceled });
        }

        let previous = self.state.selected;
        self.state.selected = Some(id);
        self.state.hovered = None;
        let from = self.state.rotation;
        let target = calculate_rotation((id - 1) as usize, self.dots_count as usize);
        self.phase = Phase::Rotating {
            from,
            to: target,
            started_at: now,
        };

        store.set(VisualHandle::ThemeLabel, Property::Opacity, Value::Scalar(0.0));
        for index in 0..self.dots_count {
            self.animate_dot(animator, index);
        }
        self.rotation_tween = Some(
            animator.animate(
                TweenSpec::new(
                    VisualHandle::Ring,
                    self.animation.rotation_duration,
                    self.animation.rotation_easing,
                )
                .from_to(Property::Rotation, Value::Scalar(from), Value::Scalar(target))
                .reporting(),
            ),
        );

        tracer.selection(&SelectionEvent {
            at: now,
            previous,
            selected: id,
            from_rotation: from,
            target_rotation: target,
        });
        SelectOutcome::Started {
            target_rotation: target,
            canceled,
        }
    }

    /// Highlights dot `id` under the pointer.
    pub fn hover_dot<A: Animator + ?Sized>(
        &mut self,
        id: u32,
        now: HostTime,
        animator: &mut A,
        tracer: &mut Tracer<'_>,
    ) -> HoverOutcome {
        if !self.is_dot(id) {
            return HoverOutcome::UnknownDot;
        }
        if self.state.selected == Some(id) {
            return HoverOutcome::SuppressedOnSelection;
        }
        if self.state.hovered == Some(id) {
            return HoverOutcome::Unchanged;
        }
        self.change_hover(Some(id), now, animator, tracer);
        HoverOutcome::Changed
    }

    /// Clears the hover highlight.
    pub fn unhover_dot<A: Animator + ?Sized>(
        &mut self,
        now: HostTime,
        animator: &mut A,
        tracer: &mut Tracer<'_>,
    ) -> HoverOutcome {
        if self.state.hovered.is_none() {
            return HoverOutcome::Unchanged;
        }
        self.change_hover(None, now, animator, tracer);
        HoverOutcome::Changed
    }

    /// Reacts to animator progress.
    ///
    /// Only events of the tracked rotation and label tweens have an effect.
    pub fn handle_events<A: Animator + ?Sized>(
        &mut self,
        events: &[TweenEvent],
        now: HostTime,
        animator: &mut A,
        tracer: &mut Tracer<'_>,
    ) {
        for event in events {
            let id = Some(event.id());
            match *event {
                TweenEvent::Updated {
                    property: Property::Rotation,
                    value: Value::Scalar(angle),
                    ..
                } if id == self.rotation_tween => {
                    self.state.rotation = angle;
                }
                TweenEvent::Completed { .. } if id == self.rotation_tween => {
                    self.finish_rotation(now, animator, tracer);
                }
                TweenEvent::Completed { .. } if id == self.label_tween => {
                    self.label_tween = None;
                    if let Some(theme) = self.state.selected {
                        tracer.label_shown(&LabelShownEvent { at: now, theme });
                    }
                }
                _ => {}
            }
        }
    }

    /// Sets the rotation instantly, abandoning any rotation in progress.
    ///
    /// The theme label is shown at once when a theme is selected.
    pub fn set_rotation<A: Animator + ?Sized>(
        &mut self,
        degrees: f64,
        animator: &mut A,
        store: &mut PropertyStore,
    ) {
        animator.cancel(&[VisualHandle::Ring, VisualHandle::ThemeLabel]);
        self.rotation_tween = None;
        self.label_tween = None;
        self.phase = Phase::Idle;
        self.state.rotation = degrees;
        store.set(VisualHandle::Ring, Property::Rotation, Value::Scalar(degrees));
        store.set(
            VisualHandle::ThemeLabel,
            Property::Opacity,
            Value::Scalar(self.resting_label_opacity()),
        );
    }

    /// Adopts sizes for a new viewport.
    ///
    /// Dots at rest snap to their style for the new sizes; dots that are
    /// still animating are re-targeted.
    pub fn apply_sizes<A: Animator + ?Sized>(
        &mut self,
        sizes: Sizes,
        animator: &mut A,
        store: &mut PropertyStore,
    ) {
        if self.sizes == sizes {
            return;
        }
        self.sizes = sizes;
        for index in 0..self.dots_count {
            let handle = VisualHandle::Dot(index);
            if animator.is_animating(handle) {
                self.animate_dot(animator, index);
            } else {
                let style =
                    DotStyle::for_emphasis(self.emphasis(index + 1), &self.sizes, &self.palette);
                store.set(handle, Property::Radius, Value::Scalar(style.radius));
                store.set(handle, Property::StrokeWidth, Value::Scalar(style.stroke_width));
            }
        }
    }

    fn finish_rotation<A: Animator + ?Sized>(
        &mut self,
        now: HostTime,
        animator: &mut A,
        tracer: &mut Tracer<'_>,
    ) {
        self.rotation_tween = None;
        if let Phase::Rotating { to, .. } = self.phase {
            self.state.rotation = to;
        }
        self.phase = Phase::Idle;
        self.label_tween = Some(
            animator.animate(
                TweenSpec::new(
                    VisualHandle::ThemeLabel,
                    self.animation.label_duration,
                    self.animation.label_easing,
                )
                .from_to(Property::Opacity, Value::Scalar(0.0), Value::Scalar(1.0)),
            ),
        );
        if let Some(selected) = self.state.selected {
            tracer.rotation_finished(&RotationFinishedEvent {
                at: now,
                selected,
                rotation: self.state.rotation,
            });
        }
    }

    fn change_hover<A: Animator + ?Sized>(
        &mut self,
        hovered: Option<u32>,
        now: HostTime,
        animator: &mut A,
        tracer: &mut Tracer<'_>,
    ) {
        let previous = self.state.hovered;
        self.state.hovered = hovered;
        for id in [previous, hovered].into_iter().flatten() {
            self.animate_dot(animator, id - 1);
        }
        tracer.hover(&HoverEvent {
            at: now,
            previous,
            hovered,
        });
    }

    fn animate_dot<A: Animator + ?Sized>(&self, animator: &mut A, index: u32) {
        let style = DotStyle::for_emphasis(self.emphasis(index + 1), &self.sizes, &self.palette);
        let (duration, easing) = (self.animation.dot_duration, self.animation.dot_easing);
        animator.animate(
            TweenSpec::new(VisualHandle::Dot(index), duration, easing)
                .to(Property::Radius, Value::Scalar(style.radius))
                .to(Property::Fill, Value::Color(style.fill))
                .to(Property::Stroke, Value::Color(style.stroke))
                .to(Property::StrokeWidth, Value::Scalar(style.stroke_width)),
        );
        animator.animate(
            TweenSpec::new(VisualHandle::DotNumber(index), duration, easing)
                .to(Property::Opacity, Value::Scalar(style.number_opacity)),
        );
    }

    fn resting_label_opacity(&self) -> f64 {
        if self.state.selected.is_some() && !self.is_rotating() {
            1.0
        } else {
            0.0
        }
    }

    fn is_dot(&self, id: u32) -> bool {
        (1..=self.dots_count).contains(&id)
    }

    fn all_handles(&self) -> Vec<VisualHandle> {
        let mut handles = Vec::with_capacity(2 + 2 * self.dots_count as usize);
        handles.push(VisualHandle::Ring);
        handles.push(VisualHandle::ThemeLabel);
        for index in 0..self.dots_count {
            handles.push(VisualHandle::Dot(index));
            handles.push(VisualHandle::DotNumber(index));
        }
        handles
    }
}
