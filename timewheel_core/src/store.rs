// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current values of every animated property, with change tracking.
//!
//! The [`PropertyStore`] is the single place animated values live. The
//! selection controller writes instantaneous values into it, the
//! [`Animator`](crate::animation::Animator) writes interpolated ones, and the
//! rendering surface reads them. Each write that actually changes a value
//! marks a [dirty channel](crate::dirty); [`PropertyStore::evaluate`] drains
//! the channels into new [`FrameChanges`], and
//! [`PropertyStore::evaluate_into`] reuses an existing buffer.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::dirty;
use crate::easing::lerp;
use crate::handle::VisualHandle;
use crate::style::{Color, DotStyle};

/// An animatable property of a [`VisualHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Ring rotation in degrees.
    Rotation,
    /// Circle radius.
    Radius,
    /// Fill color.
    Fill,
    /// Outline color.
    Stroke,
    /// Outline width.
    StrokeWidth,
    /// Opacity, `0.0..=1.0`.
    Opacity,
}

impl Property {
    /// The dirty channel a change of this property marks.
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::Rotation => dirty::TRANSFORM,
            Self::Opacity => dirty::OPACITY,
            Self::Radius | Self::Fill | Self::Stroke | Self::StrokeWidth => dirty::STYLE,
        }
    }
}

/// A property value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A number (angle, length or opacity).
    Scalar(f64),
    /// A color.
    Color(Color),
}

impl Value {
    /// Interpolates towards `to`.
    ///
    /// Values of different kinds cannot be blended; the result jumps to `to`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(a.lerp(b, t)),
            (_, to) => to,
        }
    }

    /// The number, if this is a scalar.
    #[must_use]
    pub const fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// The color, if this is a color.
    #[must_use]
    pub const fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }
}

/// Handles whose properties changed since the last evaluation, per channel.
///
/// Lists are sorted by [`VisualHandle::key`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Handles whose rotation changed.
    pub transforms: Vec<VisualHandle>,
    /// Handles whose radius, fill or stroke changed.
    pub styles: Vec<VisualHandle>,
    /// Handles whose opacity changed.
    pub opacities: Vec<VisualHandle>,
    /// Handles whose geometry was recomputed.
    pub layout: Vec<VisualHandle>,
}

impl FrameChanges {
    /// Did nothing change?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.styles.is_empty()
            && self.opacities.is_empty()
            && self.layout.is_empty()
    }

    /// Empties every list, keeping allocations.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.styles.clear();
        self.opacities.clear();
        self.layout.clear();
    }
}

/// Current animated values, keyed by handle and property.
#[derive(Debug)]
pub struct PropertyStore {
    values: BTreeMap<(VisualHandle, Property), Value>,
    dirty: DirtyTracker<u32>,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Returns the current value of a property.
    #[must_use]
    pub fn get(&self, handle: VisualHandle, property: Property) -> Option<Value> {
        self.values.get(&(handle, property)).copied()
    }

    /// Returns the current value of a scalar property.
    #[must_use]
    pub fn scalar(&self, handle: VisualHandle, property: Property) -> Option<f64> {
        self.get(handle, property).and_then(Value::as_scalar)
    }

    /// Returns the current value of a color property.
    #[must_use]
    pub fn color(&self, handle: VisualHandle, property: Property) -> Option<Color> {
        self.get(handle, property).and_then(Value::as_color)
    }

    /// Writes a value, marking its channel when the value changed.
    ///
    /// Returns whether the stored value changed.
    pub fn set(&mut self, handle: VisualHandle, property: Property, value: Value) -> bool {
        let previous = self.values.insert((handle, property), value);
        let changed = previous != Some(value);
        if changed {
            self.dirty.mark(handle.key(), property.channel());
        }
        changed
    }

    /// Writes every property of a dot's style.
    ///
    /// The number opacity goes to the matching [`VisualHandle::DotNumber`].
    pub fn set_dot_style(&mut self, index: u32, style: &DotStyle) {
        let dot = VisualHandle::Dot(index);
        self.set(dot, Property::Radius, Value::Scalar(style.radius));
        self.set(dot, Property::Fill, Value::Color(style.fill));
        self.set(dot, Property::Stroke, Value::Color(style.stroke));
        self.set(dot, Property::StrokeWidth, Value::Scalar(style.stroke_width));
        self.set(
            VisualHandle::DotNumber(index),
            Property::Opacity,
            Value::Scalar(style.number_opacity),
        );
    }

    /// Reads back a dot's full style, if every property has been written.
    #[must_use]
    pub fn dot_style(&self, index: u32) -> Option<DotStyle> {
        let dot = VisualHandle::Dot(index);
        Some(DotStyle {
            radius: self.scalar(dot, Property::Radius)?,
            fill: self.color(dot, Property::Fill)?,
            stroke: self.color(dot, Property::Stroke)?,
            stroke_width: self.scalar(dot, Property::StrokeWidth)?,
            number_opacity: self.scalar(VisualHandle::DotNumber(index), Property::Opacity)?,
        })
    }

    /// Records that a handle's geometry was recomputed.
    pub fn mark_layout(&mut self, handle: VisualHandle) {
        self.dirty.mark(handle.key(), dirty::LAYOUT);
    }

    /// Drains every dirty channel and returns what changed.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();
        self.drain_channel(dirty::TRANSFORM, &mut changes.transforms);
        self.drain_channel(dirty::STYLE, &mut changes.styles);
        self.drain_channel(dirty::OPACITY, &mut changes.opacities);
        self.drain_channel(dirty::LAYOUT, &mut changes.layout);
    }

    fn drain_channel(&mut self, channel: Channel, out: &mut Vec<VisualHandle>) {
        out.extend(
            self.dirty
                .drain(channel)
                .deterministic()
                .run()
                .map(VisualHandle::from_key),
        );
        out.sort_unstable_by_key(|handle| handle.key());
    }
}
