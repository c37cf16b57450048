// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The [`PropertyStore`](crate::store::PropertyStore) marks a channel for a
//! [`VisualHandle`](crate::handle::VisualHandle) whenever one of its values
//! changes. Channels are local-only: nothing in the widget inherits values
//! from another handle, so no dependency edges are ever added.
//!
//! [`PropertyStore::evaluate`](crate::store::PropertyStore::evaluate) drains
//! every channel into a fresh [`FrameChanges`](crate::store::FrameChanges);
//! [`PropertyStore::evaluate_into`](crate::store::PropertyStore::evaluate_into)
//! refills a caller-owned one instead. A
//! [`Presenter`](crate::surface::Presenter) consumes the result to update only
//! what moved.

use understory_dirty::Channel;

/// Ring rotation changed; every dot position and the floating label move.
pub const TRANSFORM: Channel = Channel::new(0);

/// Dot radius, fill, stroke or stroke width changed.
pub const STYLE: Channel = Channel::new(1);

/// Opacity of a dot number or of the theme label changed.
pub const OPACITY: Channel = Channel::new(2);

/// Geometry was recomputed for a new viewport size.
pub const LAYOUT: Channel = Channel::new(3);
