// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for tweens.

/// Maps linear progress in `0.0..=1.0` to eased progress.
///
/// The polynomial families match the usual "power" eases: `Quad` is power 1,
/// `Cubic` power 2 and `Quart` power 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Decelerating quadratic.
    QuadOut,
    /// Accelerating cubic.
    CubicIn,
    /// Decelerating cubic.
    CubicOut,
    /// Cubic, slow at both ends.
    CubicInOut,
    /// Decelerating quartic.
    QuartOut,
}

impl Easing {
    /// Applies the curve. Input outside `0.0..=1.0` is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => {
                let u = 1.0 - t;
                1.0 - u * u
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::QuartOut => {
                let u = 1.0 - t;
                1.0 - u * u * u * u
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = easing.apply(f64::from(step) / 100.0);
                assert!(v >= prev, "{easing:?} decreased at step {step}");
                prev = v;
            }
        }
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(Easing::CubicOut.apply(0.5) > 0.5);
        assert!(Easing::CubicIn.apply(0.5) < 0.5);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(7.0), 1.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
    }
}
