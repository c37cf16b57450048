// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween scheduling.
//!
//! The selection controller never runs animations itself. It describes them
//! as [`TweenSpec`]s and hands them to an [`Animator`], which interpolates
//! values into the [`PropertyStore`] whenever it is advanced.
//!
//! Instead of callbacks, an animator reports progress as [`TweenEvent`]s
//! tagged with the [`TweenId`] returned when the tween was scheduled. A
//! consumer that only reacts to ids it still tracks can never be reached by a
//! stale completion from a tween it has replaced or canceled.
//!
//! [`TweenEngine`] is the stock tick-driven implementation. It is fully
//! deterministic: time only moves when [`Animator::advance`] is called.

use alloc::vec::Vec;
use core::fmt;

use crate::easing::Easing;
use crate::handle::VisualHandle;
use crate::store::{Property, PropertyStore, Value};
use crate::time::{Duration, HostTime};

/// Identifies one scheduled tween.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(pub u64);

impl fmt::Debug for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TweenId({})", self.0)
    }
}

/// One property animated by a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// The animated property.
    pub property: Property,
    /// Explicit start value; `None` starts from the store's current value.
    pub from: Option<Value>,
    /// End value.
    pub to: Value,
}

/// Description of a tween on one target.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    /// The element being animated.
    pub target: VisualHandle,
    /// Properties and their goals.
    pub tracks: Vec<Track>,
    /// Total run time.
    pub duration: Duration,
    /// Progress curve.
    pub easing: Easing,
    /// Emit a [`TweenEvent::Updated`] for every advance.
    pub report_updates: bool,
}

impl TweenSpec {
    /// Starts a spec for `target` with no tracks.
    #[must_use]
    pub fn new(target: VisualHandle, duration: Duration, easing: Easing) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            duration,
            easing,
            report_updates: false,
        }
    }

    /// Animates `property` from its current value to `to`.
    #[must_use]
    pub fn to(mut self, property: Property, to: Value) -> Self {
        self.tracks.push(Track {
            property,
            from: None,
            to,
        });
        self
    }

    /// Animates `property` from `from` to `to`.
    #[must_use]
    pub fn from_to(mut self, property: Property, from: Value, to: Value) -> Self {
        self.tracks.push(Track {
            property,
            from: Some(from),
            to,
        });
        self
    }

    /// Requests per-advance [`TweenEvent::Updated`] events.
    #[must_use]
    pub fn reporting(mut self) -> Self {
        self.report_updates = true;
        self
    }
}

/// Progress reported by [`Animator::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenEvent {
    /// A reporting tween wrote an intermediate (or final) value.
    Updated {
        /// The tween.
        id: TweenId,
        /// Its target.
        target: VisualHandle,
        /// The property written.
        property: Property,
        /// The value written.
        value: Value,
    },
    /// A tween reached its end. Canceled tweens never complete.
    Completed {
        /// The tween.
        id: TweenId,
        /// Its target.
        target: VisualHandle,
    },
}

impl TweenEvent {
    /// The tween this event belongs to.
    #[must_use]
    pub const fn id(&self) -> TweenId {
        match self {
            Self::Updated { id, .. } | Self::Completed { id, .. } => *id,
        }
    }
}

/// A tween scheduling service.
///
/// Implementations must honor two rules the selection controller relies on:
///
/// - A canceled tween emits no further events.
/// - Scheduling a tween for a (target, property) pair that another tween is
///   already animating removes that property from the older tween.
pub trait Animator {
    /// Schedules a tween starting at the animator's current time.
    fn animate(&mut self, spec: TweenSpec) -> TweenId;

    /// Cancels every tween on any of `targets`; returns how many were removed.
    fn cancel(&mut self, targets: &[VisualHandle]) -> usize;

    /// Moves time to `now`, writes interpolated values into `store`, and
    /// appends progress to `events`.
    fn advance(&mut self, now: HostTime, store: &mut PropertyStore, events: &mut Vec<TweenEvent>);

    /// Is any tween currently running on `target`?
    fn is_animating(&self, target: VisualHandle) -> bool;
}

#[derive(Clone, Copy, Debug)]
struct Resolved {
    property: Property,
    from: Value,
    to: Value,
}

#[derive(Clone, Debug)]
struct ActiveTween {
    id: TweenId,
    spec: TweenSpec,
    started_at: HostTime,
    // Start values are captured on the first advance, not at scheduling time.
    resolved: Option<Vec<Resolved>>,
}

impl ActiveTween {
    fn resolve(&mut self, store: &PropertyStore) -> &[Resolved] {
        let target = self.spec.target;
        let tracks = &self.spec.tracks;
        self.resolved.get_or_insert_with(|| {
            tracks
                .iter()
                .map(|track| Resolved {
                    property: track.property,
                    from: track
                        .from
                        .or_else(|| store.get(target, track.property))
                        .unwrap_or(track.to),
                    to: track.to,
                })
                .collect()
        })
    }
}

/// Deterministic, tick-driven [`Animator`].
///
/// A property with no current value in the store and no explicit start value
/// snaps to its goal on the first advance.
#[derive(Debug, Default)]
pub struct TweenEngine {
    now: HostTime,
    next_id: u64,
    active: Vec<ActiveTween>,
}

impl TweenEngine {
    /// Creates an engine whose clock starts at `now`.
    #[must_use]
    pub fn new(now: HostTime) -> Self {
        Self {
            now,
            next_id: 0,
            active: Vec::new(),
        }
    }

    /// The time of the last advance (or creation).
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// Number of running tweens.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Is the tween still running?
    #[must_use]
    pub fn is_active(&self, id: TweenId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }
}

impl Animator for TweenEngine {
    fn animate(&mut self, spec: TweenSpec) -> TweenId {
        // Overwrite: a newer tween owns every property it animates.
        for tween in &mut self.active {
            if tween.spec.target != spec.target {
                continue;
            }
            tween
                .spec
                .tracks
                .retain(|old| !spec.tracks.iter().any(|new| new.property == old.property));
            if let Some(resolved) = &mut tween.resolved {
                resolved.retain(|old| !spec.tracks.iter().any(|new| new.property == old.property));
            }
        }
        self.active.retain(|t| !t.spec.tracks.is_empty());

        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(ActiveTween {
            id,
            spec,
            started_at: self.now,
            resolved: None,
        });
        id
    }

    fn cancel(&mut self, targets: &[VisualHandle]) -> usize {
        let before = self.active.len();
        self.active.retain(|t| !targets.contains(&t.spec.target));
        before - self.active.len()
    }

    fn advance(&mut self, now: HostTime, store: &mut PropertyStore, events: &mut Vec<TweenEvent>) {
        self.now = self.now.max(now);
        let now = self.now;
        self.active.retain_mut(|tween| {
            let linear = tween.spec.duration.progress(now - tween.started_at);
            let eased = tween.spec.easing.apply(linear);
            let id = tween.id;
            let target = tween.spec.target;
            let report = tween.spec.report_updates;
            for track in tween.resolve(store).to_vec() {
                let value = if linear >= 1.0 {
                    track.to
                } else {
                    track.from.lerp(track.to, eased)
                };
                store.set(target, track.property, value);
                if report {
                    events.push(TweenEvent::Updated {
                        id,
                        target,
                        property: track.property,
                        value,
                    });
                }
            }
            if linear >= 1.0 {
                events.push(TweenEvent::Completed { id, target });
                false
            } else {
                true
            }
        });
    }

    fn is_animating(&self, target: VisualHandle) -> bool {
        self.active.iter().any(|t| t.spec.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn rotation(store: &PropertyStore) -> f64 {
        store
            .scalar(VisualHandle::Ring, Property::Rotation)
            .unwrap_or(f64::NAN)
    }

    #[test]
    fn linear_tween_interpolates_and_completes() {
        let mut store = PropertyStore::new();
        store.set(VisualHandle::Ring, Property::Rotation, Value::Scalar(0.0));
        let mut engine = TweenEngine::new(ms(0));
        let mut events = Vec::new();

        let id = engine.animate(
            TweenSpec::new(VisualHandle::Ring, Duration::from_millis(100), Easing::Linear)
                .to(Property::Rotation, Value::Scalar(200.0))
                .reporting(),
        );

        engine.advance(ms(25), &mut store, &mut events);
        assert!((rotation(&store) - 50.0).abs() < 1e-9);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id(), id);

        events.clear();
        engine.advance(ms(100), &mut store, &mut events);
        assert_eq!(rotation(&store), 200.0);
        assert_eq!(
            events,
            [
                TweenEvent::Updated {
                    id,
                    target: VisualHandle::Ring,
                    property: Property::Rotation,
                    value: Value::Scalar(200.0),
                },
                TweenEvent::Completed {
                    id,
                    target: VisualHandle::Ring,
                },
            ]
        );
        assert_eq!(engine.active_len(), 0);
    }

    #[test]
    fn start_value_is_captured_on_first_advance() {
        let mut store = PropertyStore::new();
        store.set(VisualHandle::Ring, Property::Rotation, Value::Scalar(0.0));
        let mut engine = TweenEngine::new(ms(0));
        let mut events = Vec::new();

        engine.animate(
            TweenSpec::new(VisualHandle::Ring, Duration::from_millis(100), Easing::Linear)
                .to(Property::Rotation, Value::Scalar(100.0)),
        );
        // Written after scheduling but before the first advance: becomes the start.
        store.set(VisualHandle::Ring, Property::Rotation, Value::Scalar(50.0));
        engine.advance(ms(50), &mut store, &mut events);
        assert!((rotation(&store) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn unreported_tweens_only_emit_completion() {
        let mut store = PropertyStore::new();
        let mut engine = TweenEngine::new(ms(0));
        let mut events = Vec::new();
        let id = engine.animate(
            TweenSpec::new(VisualHandle::ThemeLabel, Duration::from_millis(10), Easing::QuadOut)
                .from_to(Property::Opacity, Value::Scalar(0.0), Value::Scalar(1.0)),
        );
        engine.advance(ms(5), &mut store, &mut events);
        assert!(events.is_empty());
        let mid = store
            .scalar(VisualHandle::ThemeLabel, Property::Opacity)
            .unwrap_or_default();
        assert!((mid - 0.75).abs() < 1e-9, "quad-out at half time is 0.75, got {mid}");

        engine.advance(ms(10), &mut store, &mut events);
        assert_eq!(
            events,
            [TweenEvent::Completed {
                id,
                target: VisualHandle::ThemeLabel
            }]
        );
    }

    #[test]
    fn canceled_tweens_stay_silent() {
        let mut store = PropertyStore::new();
        let mut engine = TweenEngine::new(ms(0));
        let mut events = Vec::new();
        engine.animate(
            TweenSpec::new(VisualHandle::Dot(0), Duration::from_millis(10), Easing::Linear)
                .to(Property::Radius, Value::Scalar(8.0))
                .reporting(),
        );
        engine.animate(
            TweenSpec::new(VisualHandle::Dot(1), Duration::from_millis(10), Easing::Linear)
                .to(Property::Radius, Value::Scalar(8.0)),
        );

        assert_eq!(engine.cancel(&[VisualHandle::Dot(0), VisualHandle::Ring]), 1);
        assert!(!engine.is_animating(VisualHandle::Dot(0)));
        assert!(engine.is_animating(VisualHandle::Dot(1)));

        engine.advance(ms(20), &mut store, &mut events);
        assert!(events.iter().all(|e| matches!(
            e,
            TweenEvent::Completed {
                target: VisualHandle::Dot(1),
                ..
            }
        )));
        assert_eq!(store.scalar(VisualHandle::Dot(0), Property::Radius), None);
    }

    #[test]
    fn newer_tween_overwrites_shared_properties() {
        let mut store = PropertyStore::new();
        let mut engine = TweenEngine::new(ms(0));
        let mut events = Vec::new();
        let dot = VisualHandle::Dot(0);
        let first = engine.animate(
            TweenSpec::new(dot, Duration::from_millis(100), Easing::Linear)
                .to(Property::Radius, Value::Scalar(10.0))
                .to(Property::Fill, Value::Color(Color::rgb(255, 0, 0))),
        );
        let second = engine.animate(
            TweenSpec::new(dot, Duration::from_millis(100), Easing::Linear)
                .to(Property::Radius, Value::Scalar(2.0)),
        );
        assert!(engine.is_active(first), "first still owns Fill");

        let third = engine.animate(
            TweenSpec::new(dot, Duration::from_millis(100), Easing::Linear)
                .to(Property::Fill, Value::Color(Color::rgb(0, 0, 255))),
        );
        assert!(!engine.is_active(first), "first lost all tracks");
        assert!(engine.is_active(second));
        assert!(engine.is_active(third));

        engine.advance(ms(100), &mut store, &mut events);
        assert_eq!(store.scalar(dot, Property::Radius), Some(2.0));
        assert_eq!(store.color(dot, Property::Fill), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn zero_duration_lands_on_next_advance() {
        let mut store = PropertyStore::new();
        let mut engine = TweenEngine::new(ms(7));
        let mut events = Vec::new();
        engine.animate(
            TweenSpec::new(VisualHandle::Ring, Duration::ZERO, Easing::CubicInOut)
                .from_to(Property::Rotation, Value::Scalar(0.0), Value::Scalar(90.0)),
        );
        engine.advance(ms(7), &mut store, &mut events);
        assert_eq!(rotation(&store), 90.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn time_never_runs_backwards() {
        let mut store = PropertyStore::new();
        let mut engine = TweenEngine::new(ms(100));
        let mut events = Vec::new();
        engine.advance(ms(50), &mut store, &mut events);
        assert_eq!(engine.now(), ms(100));
    }
}
