// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for rendering surfaces.
//!
//! The engine never draws. A host integration (an SVG writer, a retained-mode
//! UI toolkit, a canvas) implements [`Presenter`] and receives a resolved
//! [`Frame`] together with the [`FrameChanges`] since the previous
//! presentation, so it can update only the elements that moved.

use crate::frame::Frame;
use crate::store::FrameChanges;

/// Applies a frame to a host-side presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     // Fire a pending trailing resize, advance tweens, route events.
///     timeline.tick(now, &mut tracer);
///
///     // Drain dirty channels and hand the snapshot to the surface.
///     timeline.present(&mut presenter);
/// }
/// ```
pub trait Presenter {
    /// Applies `frame`; `changes` lists the handles that changed since the
    /// previous call.
    fn present(&mut self, frame: &Frame<'_>, changes: &FrameChanges);
}
