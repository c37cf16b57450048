// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring rotation angles and rotated positions.

use kurbo::{Affine, Point, Vec2};

use crate::config::LabelConfig;
use crate::style::Sizes;

/// Rotation in degrees that brings dot `selected_index` of `dots_count` to
/// the front of the ring.
///
/// Small rings use hand-tuned offsets; the table below is intentionally not
/// a single formula. `dots_count` must be positive and
/// `selected_index < dots_count`.
///
/// | count | angle |
/// |---|---|
/// | 2 | `-90 - i·180` |
/// | 3, 5 | `(n - i - 0.5)·360/n` |
/// | 4, 6 | `(n - i - 1)·360/n` |
/// | other | `(n - i)·360/n` |
#[must_use]
pub fn calculate_rotation(selected_index: usize, dots_count: usize) -> f64 {
    let i = selected_index as f64;
    let n = dots_count as f64;
    let step = 360.0 / n;
    match dots_count {
        2 => -90.0 - i * 180.0,
        3 | 5 => (n - i - 0.5) * step,
        4 | 6 => (n - i - 1.0) * step,
        _ => (n - i) * step,
    }
}

/// Rotates `point` around `center` by `degrees`.
///
/// Positive angles turn clockwise on a y-down screen, matching the order in
/// which [`calculate_dots`](crate::dots::calculate_dots) lays dots out.
#[must_use]
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    Affine::rotate_about(degrees.to_radians(), center) * point
}

/// Where the floating theme-name label goes for the selected dot.
///
/// The dot's static position is rotated with the ring, then offset up and to
/// the right by a distance proportional to the selected dot radius.
#[must_use]
pub fn label_position(
    dot_position: Point,
    center: Point,
    rotation_degrees: f64,
    sizes: &Sizes,
    label: &LabelConfig,
) -> Point {
    let rotated = rotate_point(dot_position, center, rotation_degrees);
    let offset = sizes.selected_dot_radius * label.offset_multiplier;
    rotated + Vec2::new(offset, -offset * label.vertical_offset_multiplier)
}
