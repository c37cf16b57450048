// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual emphasis of the dots.
//!
//! A dot is drawn in one of three [`Emphasis`] states. Each state resolves to a
//! [`DotStyle`] (radius, fill, outline) plus an opacity for the dot's number;
//! the selection controller animates between resolved styles.

use core::fmt;

use crate::config::{Palette, SizingConfig};
use crate::easing::lerp;

/// An 8-bit sRGB color with straight alpha.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// A color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel interpolation, rounded to the nearest step.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
            a: lerp_channel(self.a, other.a, t),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the u8 range before the cast"
)]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let v = lerp(f64::from(a), f64::from(b), t.clamp(0.0, 1.0)) + 0.5;
    v.clamp(0.0, 255.0) as u8
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// How strongly a dot is highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Small, filled with the default color, number hidden.
    Idle,
    /// Under the pointer.
    Hovered,
    /// The active theme.
    Selected,
}

impl Emphasis {
    /// Resolves the emphasis of dot `id` for the given selection and hover.
    ///
    /// Selection wins over hover.
    #[must_use]
    pub fn of(id: u32, selected: Option<u32>, hovered: Option<u32>) -> Self {
        if selected == Some(id) {
            Self::Selected
        } else if hovered == Some(id) {
            Self::Hovered
        } else {
            Self::Idle
        }
    }

    /// Is the dot highlighted at all?
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Stroke widths and radii resolved for one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sizes {
    /// Width of the guide lines and the ring outline.
    pub line_stroke_width: f64,
    /// Width of the gradient marker.
    pub gradient_line_width: f64,
    /// Radius of an idle dot.
    pub dot_radius: f64,
    /// Radius of the selected dot.
    pub selected_dot_radius: f64,
    /// Radius of a hovered dot.
    pub hovered_dot_radius: f64,
}

impl Sizes {
    /// Resolves every size for a viewport whose smaller side is `min_size`.
    #[must_use]
    pub fn resolve(config: &SizingConfig, min_size: f64) -> Self {
        let selected_dot_radius = config.selected_dot_radius.resolve(min_size);
        Self {
            line_stroke_width: config.line_stroke.resolve(min_size),
            gradient_line_width: config.gradient_line.resolve(min_size),
            dot_radius: config.dot_radius.resolve(min_size),
            selected_dot_radius,
            hovered_dot_radius: selected_dot_radius * config.hovered_dot_scale,
        }
    }
}

/// Animated appearance of one dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    /// Circle radius.
    pub radius: f64,
    /// Fill color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width.
    pub stroke_width: f64,
    /// Opacity of the number drawn inside the dot.
    pub number_opacity: f64,
}

impl DotStyle {
    /// The resting style of a dot in the given emphasis.
    #[must_use]
    pub fn for_emphasis(emphasis: Emphasis, sizes: &Sizes, palette: &Palette) -> Self {
        match emphasis {
            Emphasis::Idle => Self {
                radius: sizes.dot_radius,
                fill: palette.dot_default,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
                number_opacity: 0.0,
            },
            Emphasis::Hovered | Emphasis::Selected => Self {
                radius: if emphasis == Emphasis::Selected {
                    sizes.selected_dot_radius
                } else {
                    sizes.hovered_dot_radius
                },
                fill: palette.dot_active,
                stroke: palette.dot_stroke,
                stroke_width: 1.0,
                number_opacity: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimelineConfig;

    #[test]
    fn selection_wins_over_hover() {
        assert_eq!(Emphasis::of(2, Some(2), Some(2)), Emphasis::Selected);
        assert_eq!(Emphasis::of(2, Some(1), Some(2)), Emphasis::Hovered);
        assert_eq!(Emphasis::of(3, Some(1), Some(2)), Emphasis::Idle);
        assert!(!Emphasis::Idle.is_active());
        assert!(Emphasis::Hovered.is_active());
    }

    #[test]
    fn hovered_dot_is_scaled_selected_radius() {
        let config = TimelineConfig::standard();
        let sizes = Sizes::resolve(&config.sizing, 1000.0);
        let hovered = DotStyle::for_emphasis(Emphasis::Hovered, &sizes, &config.palette);
        let selected = DotStyle::for_emphasis(Emphasis::Selected, &sizes, &config.palette);
        let idle = DotStyle::for_emphasis(Emphasis::Idle, &sizes, &config.palette);
        assert!(
            (hovered.radius - selected.radius * config.sizing.hovered_dot_scale).abs() < 1e-9,
            "hover radius should follow the selected radius"
        );
        assert_eq!(idle.stroke, Color::TRANSPARENT);
        assert_eq!(idle.number_opacity, 0.0);
        assert_eq!(selected.fill, config.palette.dot_active);
    }

    #[test]
    fn color_lerp_rounds_per_channel() {
        let a = Color::rgba(0, 0, 0, 0);
        let b = Color::rgba(255, 100, 10, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgba(128, 50, 5, 128));
    }
}
