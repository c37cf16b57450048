// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular layout and rotation-animation engine for a historical timeline.
//!
//! `timewheel_core` is the headless half of an interactive timeline widget:
//! a ring of selectable theme dots that turns to bring the selected theme to
//! the front, highlights dots under the pointer, and fades in the theme name
//! once the ring settles. It is `no_std` compatible (with `alloc`), never
//! reads a clock, and never draws; hosts feed it sizes, pointer input and
//! timestamps, and render the [`Frame`](frame::Frame)s it produces.
//!
//! # Architecture
//!
//! ```text
//!   viewport size ──► Throttle ──► LayoutCache ──► Layout
//!                                                   │ geometry, paddings,
//!                                                   │ sizes, dots
//!                                                   ▼
//!   pointer / keys ──► SelectionController ──► Animator ──► PropertyStore
//!                            ▲                    │             │
//!                            └──── TweenEvent ────┘             │
//!                                                               ▼
//!                             Frame + FrameChanges ──► Presenter::present()
//! ```
//!
//! **[`geometry`]**, **[`dots`]**, **[`rotation`]** — Pure layout math: ring
//! placement, paddings, dot positions with label anchors, and the rotation
//! table that brings a dot to the front.
//!
//! **[`selection`]** — The transition state machine. It cancels stale tweens,
//! schedules dot emphasis and ring rotation, and fades the label in once the
//! rotation completes.
//!
//! **[`animation`]** — The [`Animator`](animation::Animator) capability and
//! the deterministic, tick-driven [`TweenEngine`](animation::TweenEngine).
//!
//! **[`store`]** / **[`dirty`]** — Current animated values with multi-channel
//! dirty tracking via `understory_dirty`.
//!
//! **[`orchestrator`]** — Owns everything and exposes the widget's public
//! operations.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `serde` (disabled by default): Derives `Serialize`/`Deserialize` for the
//!   catalog types.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod catalog;
pub mod config;
pub mod dirty;
pub mod dots;
pub mod easing;
pub mod frame;
pub mod geometry;
pub mod handle;
pub mod layout;
pub mod orchestrator;
pub mod rotation;
pub mod selection;
pub mod store;
pub mod style;
pub mod surface;
pub mod throttle;
pub mod time;
pub mod trace;
