// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque handles to the animated visual elements.
//!
//! The rendering surface owns the actual elements; the engine only addresses
//! them by stable dot index, so controllers and tests never hold references
//! into a live UI.

use core::fmt;

/// One animatable element of the diagram.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisualHandle {
    /// The whole dot ring; carries the rotation.
    Ring,
    /// The floating theme-name label next to the selected dot.
    ThemeLabel,
    /// The circle of the dot at a 0-based index.
    Dot(u32),
    /// The number drawn inside the dot at a 0-based index.
    DotNumber(u32),
}

impl VisualHandle {
    /// Dense key used for dirty tracking.
    #[must_use]
    pub const fn key(self) -> u32 {
        match self {
            Self::Ring => 0,
            Self::ThemeLabel => 1,
            Self::Dot(i) => 2 + 2 * i,
            Self::DotNumber(i) => 3 + 2 * i,
        }
    }

    /// Inverse of [`key`](Self::key).
    #[must_use]
    pub const fn from_key(key: u32) -> Self {
        match key {
            0 => Self::Ring,
            1 => Self::ThemeLabel,
            k if k % 2 == 0 => Self::Dot((k - 2) / 2),
            k => Self::DotNumber((k - 3) / 2),
        }
    }

    /// The dot index this handle belongs to, if any.
    #[must_use]
    pub const fn dot_index(self) -> Option<u32> {
        match self {
            Self::Dot(i) | Self::DotNumber(i) => Some(i),
            Self::Ring | Self::ThemeLabel => None,
        }
    }
}

impl fmt::Debug for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ring => f.write_str("Ring"),
            Self::ThemeLabel => f.write_str("ThemeLabel"),
            Self::Dot(i) => write!(f, "Dot({i})"),
            Self::DotNumber(i) => write!(f, "DotNumber({i})"),
        }
    }
}
