// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle geometry, paddings and guide lines of the diagram.
//!
//! All functions here are pure and total over non-negative sizes. A zero
//! width or height is the "not yet measured" state of a container; it
//! produces degenerate (zero) geometry rather than an error, and the
//! [orchestrator](crate::orchestrator) skips rendering for it.

use kurbo::{Circle, Line, Point, Rect, Size};

/// Upper bound of the ring radius, regardless of viewport size.
pub const MAX_CIRCLE_RADIUS: f64 = 400.0;

/// Share of the viewport's smaller side used as ring radius.
pub const CIRCLE_RADIUS_RATIO: f64 = 0.25;

/// The ring sits above the vertical middle, leaving room for the facts panel.
pub const CENTER_Y_DIVISOR: f64 = 2.5;

/// Ring placement for one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Center of the ring.
    pub center: Point,
    /// `min(width, height)`.
    pub min_size: f64,
    /// Ring radius.
    pub circle_radius: f64,
}

impl Geometry {
    /// The ring as a circle.
    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.circle_radius)
    }
}

/// Computes the ring placement for a container of `width` x `height`.
#[must_use]
pub fn calculate_geometry(width: f64, height: f64) -> Geometry {
    let min_size = width.min(height);
    Geometry {
        center: Point::new(width / 2.0, height / CENTER_Y_DIVISOR),
        min_size,
        circle_radius: (min_size * CIRCLE_RADIUS_RATIO).min(MAX_CIRCLE_RADIUS),
    }
}

/// Horizontal margins of the diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paddings {
    /// Margin left of the left guide line.
    pub left: f64,
    /// Margin right of the right guide line.
    pub right: f64,
}

/// Computes the asymmetric paddings for a container `width` wide.
///
/// The left margin is twice the right one to leave room for the title and
/// its gradient marker.
#[must_use]
pub fn calculate_paddings(width: f64) -> Paddings {
    Paddings {
        left: width * 0.2,
        right: width * 0.1,
    }
}

/// The straight decorations around the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLines {
    /// Horizontal line through the ring center, between the side guides.
    pub horizontal: Line,
    /// Vertical line through the ring center.
    pub center_vertical: Line,
    /// Vertical line at the left padding.
    pub left: Line,
    /// Vertical line at the right padding.
    pub right: Line,
    /// Short gradient bar on the left guide, next to the title.
    pub gradient_marker: Rect,
}

impl GuideLines {
    /// Lays out the guide lines for a container.
    ///
    /// `title_baseline` is the vertical position of the title block; the
    /// gradient marker starts there.
    #[must_use]
    pub fn new(
        size: Size,
        geometry: &Geometry,
        paddings: &Paddings,
        gradient_width: f64,
        title_baseline: f64,
    ) -> Self {
        let right_x = size.width - paddings.right;
        let marker_height = (title_baseline + 30.0).min(110.0);
        let marker_x = paddings.left - gradient_width / 2.0;
        Self {
            horizontal: Line::new(
                (paddings.left, geometry.center.y),
                (right_x, geometry.center.y),
            ),
            center_vertical: Line::new((geometry.center.x, 0.0), (geometry.center.x, size.height)),
            left: Line::new((paddings.left, 0.0), (paddings.left, size.height)),
            right: Line::new((right_x, 0.0), (right_x, size.height)),
            gradient_marker: Rect::new(
                marker_x,
                title_baseline,
                marker_x + gradient_width,
                title_baseline + marker_height,
            ),
        }
    }
}
