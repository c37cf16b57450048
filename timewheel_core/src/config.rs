// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for layout, sizing and animation.
//!
//! Everything here is plain `Copy` data with a `const fn` preset, so a widget
//! can be configured at compile time and the defaults stay visible in one
//! place. [`TimelineConfig::standard()`] is the stock look of the widget.

use crate::easing::Easing;
use crate::style::Color;
use crate::time::Duration;

/// A value proportional to the viewport's smaller side, clamped to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    /// Multiplier applied to the viewport's minimum dimension.
    pub ratio: f64,
    /// Lower bound of the result.
    pub min: f64,
    /// Upper bound of the result.
    pub max: f64,
}

impl Clamped {
    /// Creates a clamped ratio.
    #[must_use]
    pub const fn new(ratio: f64, min: f64, max: f64) -> Self {
        Self { ratio, min, max }
    }

    /// Resolves the value for a viewport whose smaller side is `min_size`.
    ///
    /// The lower bound is applied first, then the upper bound, so a
    /// misconfigured `min > max` resolves to `max`.
    #[must_use]
    pub fn resolve(self, min_size: f64) -> f64 {
        (min_size * self.ratio).max(self.min).min(self.max)
    }
}

/// Durations and easing curves of the selection transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Duration of dot emphasis changes (radius, fill, stroke, number opacity).
    pub dot_duration: Duration,
    /// Easing of dot emphasis changes.
    pub dot_easing: Easing,
    /// Duration of the ring rotation.
    pub rotation_duration: Duration,
    /// Easing of the ring rotation.
    pub rotation_easing: Easing,
    /// Duration of the theme label fade-in after rotation completes.
    pub label_duration: Duration,
    /// Easing of the theme label fade-in.
    pub label_easing: Easing,
}

impl AnimationConfig {
    /// Default timing.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            dot_duration: Duration::from_millis(300),
            dot_easing: Easing::CubicOut,
            rotation_duration: Duration::from_millis(1000),
            rotation_easing: Easing::CubicInOut,
            label_duration: Duration::from_millis(500),
            label_easing: Easing::QuadOut,
        }
    }

    /// Zero-length animations; every transition lands on the next tick.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            dot_duration: Duration::ZERO,
            dot_easing: Easing::Linear,
            rotation_duration: Duration::ZERO,
            rotation_easing: Easing::Linear,
            label_duration: Duration::ZERO,
            label_easing: Easing::Linear,
        }
    }
}

/// Stroke widths and dot radii, as clamped ratios of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingConfig {
    /// Width of the guide lines and the ring outline.
    pub line_stroke: Clamped,
    /// Width of the gradient marker next to the title.
    pub gradient_line: Clamped,
    /// Radius of an idle dot.
    pub dot_radius: Clamped,
    /// Radius of the selected dot; also the hit-test radius of every dot.
    pub selected_dot_radius: Clamped,
    /// Hovered dots are drawn at `selected_dot_radius * hovered_dot_scale`.
    pub hovered_dot_scale: f64,
}

impl SizingConfig {
    /// Default sizing.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            line_stroke: Clamped::new(0.001, 1.0, 2.0),
            gradient_line: Clamped::new(0.005, 3.0, 5.0),
            dot_radius: Clamped::new(0.004, 3.0, 4.0),
            selected_dot_radius: Clamped::new(0.03, 20.0, 28.0),
            hovered_dot_scale: 0.9,
        }
    }
}

/// Colors of the dots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill of an idle dot.
    pub dot_default: Color,
    /// Fill of a selected or hovered dot.
    pub dot_active: Color,
    /// Outline of a selected or hovered dot.
    pub dot_stroke: Color,
    /// Top color of the gradient marker.
    pub gradient_start: Color,
    /// Bottom color of the gradient marker.
    pub gradient_end: Color,
}

impl Palette {
    /// Default colors.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            dot_default: Color::rgb(0x42, 0x56, 0x7A),
            dot_active: Color::rgb(0xF4, 0xF5, 0xF9),
            dot_stroke: Color::rgba(0x30, 0x3E, 0x58, 0x80),
            gradient_start: Color::rgb(0x38, 0x77, 0xEE),
            gradient_end: Color::rgb(0xEF, 0x5D, 0xA8),
        }
    }
}

/// Static label anchors placed next to each dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotLayoutConfig {
    /// Nominal width of a dot label.
    pub label_width: f64,
    /// Gap between a dot and its label.
    pub label_offset: f64,
}

impl DotLayoutConfig {
    /// Default label metrics.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            label_width: 120.0,
            label_offset: 40.0,
        }
    }
}

/// Placement of the floating theme-name label and the period labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelConfig {
    /// Label offset from the selected dot, in multiples of its radius.
    pub offset_multiplier: f64,
    /// Vertical share of the offset (the label sits up and to the right).
    pub vertical_offset_multiplier: f64,
    /// Horizontal shift applied to the label box origin.
    pub position_adjustment: f64,
    /// Horizontal inset of the period labels from the ring's sides.
    pub period_offset_x: f64,
    /// Vertical shift of the period labels and the label box.
    pub period_offset_y: f64,
    /// Width of the label box.
    pub width: f64,
    /// Height of the label box.
    pub height: f64,
}

impl LabelConfig {
    /// Default label placement.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            offset_multiplier: 1.5,
            vertical_offset_multiplier: 0.5,
            position_adjustment: 0.0,
            period_offset_x: 30.0,
            period_offset_y: -20.0,
            width: 200.0,
            height: 40.0,
        }
    }
}

/// Resize coalescing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeConfig {
    /// At most one layout recomputation per interval.
    pub throttle_interval: Duration,
}

impl ResizeConfig {
    /// Default throttle.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            throttle_interval: Duration::from_millis(400),
        }
    }
}

/// Complete widget configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    /// Transition timing.
    pub animation: AnimationConfig,
    /// Stroke widths and radii.
    pub sizing: SizingConfig,
    /// Dot colors.
    pub palette: Palette,
    /// Static dot label anchors.
    pub dots: DotLayoutConfig,
    /// Floating label placement.
    pub label: LabelConfig,
    /// Resize throttling.
    pub resize: ResizeConfig,
}

impl TimelineConfig {
    /// The stock widget.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            animation: AnimationConfig::standard(),
            sizing: SizingConfig::standard(),
            palette: Palette::standard(),
            dots: DotLayoutConfig::standard(),
            label: LabelConfig::standard(),
            resize: ResizeConfig::standard(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
