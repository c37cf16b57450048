// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of the theme dots on the ring.
//!
//! Dot `i` of `n` sits at angle `2π·i/n`, starting from the rightmost point of
//! the ring and proceeding in increasing angle (clockwise on a y-down
//! screen). Every dot also gets a static label anchor, chosen from a fixed
//! per-sector table that pushes labels away from the ring. Labels are not
//! checked for collisions.

use alloc::vec::Vec;
use core::f64::consts::PI;

use kurbo::{Point, Vec2};

use crate::config::DotLayoutConfig;

/// One theme's anchor on the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Theme id, `1..=n`.
    pub id: u32,
    /// Angle on the ring in radians, before any rotation.
    pub angle: f64,
    /// Position on the ring, before any rotation.
    pub position: Point,
    /// Anchor of the dot's static label.
    pub label_anchor: Point,
}

/// The six angular sectors of the label placement table.
///
/// Each sector covers angles up to and including its upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelSector {
    /// `0..=π/6`: label to the right.
    Right,
    /// `..=π/2`: right and slightly down.
    LowerRight,
    /// `..=5π/6`: below.
    Bottom,
    /// `..=7π/6`: left and slightly down.
    Left,
    /// `..=3π/2`: left.
    UpperLeft,
    /// The rest of the turn: up and to the right.
    Top,
}

impl LabelSector {
    /// Classifies an angle in radians, `0..2π`.
    #[must_use]
    pub fn for_angle(angle: f64) -> Self {
        if angle <= PI / 6.0 {
            Self::Right
        } else if angle <= PI / 2.0 {
            Self::LowerRight
        } else if angle <= (5.0 * PI) / 6.0 {
            Self::Bottom
        } else if angle <= (7.0 * PI) / 6.0 {
            Self::Left
        } else if angle <= (3.0 * PI) / 2.0 {
            Self::UpperLeft
        } else {
            Self::Top
        }
    }

    /// Offset of the label anchor from the dot.
    #[must_use]
    pub fn offset(self, metrics: &DotLayoutConfig) -> Vec2 {
        let left = -(metrics.label_width + metrics.label_offset);
        match self {
            Self::Right => Vec2::new(metrics.label_offset, 0.0),
            Self::LowerRight => Vec2::new(metrics.label_offset, 10.0),
            Self::Bottom => Vec2::new(30.0, 40.0),
            Self::Left => Vec2::new(left, 20.0),
            Self::UpperLeft => Vec2::new(left, 0.0),
            Self::Top => Vec2::new(30.0, -30.0),
        }
    }
}

/// Places `count` dots evenly on the ring around `center`.
#[must_use]
pub fn calculate_dots(
    center: Point,
    circle_radius: f64,
    count: usize,
    metrics: &DotLayoutConfig,
) -> Vec<Dot> {
    (0..count)
        .map(|i| {
            let angle = (PI * 2.0 * i as f64) / count as f64;
            let position = center + Vec2::from_angle(angle) * circle_radius;
            let label_anchor = position + LabelSector::for_angle(angle).offset(metrics);
            Dot {
                id: dot_id(i),
                angle,
                position,
                label_anchor,
            }
        })
        .collect()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "dot counts come from a theme catalog and are far below u32::MAX"
)]
fn dot_id(index: usize) -> u32 {
    index as u32 + 1
}
