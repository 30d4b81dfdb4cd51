// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turtle state, layered compositing, and frame-coalesced redraws.
//!
//! `tortuga_core` implements a "turtle graphics" pen: an oriented cursor that
//! strokes line segments onto a raster surface in response to relative
//! motion and rotation commands. It is `no_std` compatible (with `alloc`) and
//! is generic over the drawing surface, so the same engine drives a browser
//! canvas, a GPU texture, or the headless [`display_list`] used in tests.
//!
//! # Architecture
//!
//! Commands mutate state synchronously; only the composite of the visible
//! frame is deferred to the host's next display tick:
//!
//! ```text
//!   Turtle::forward() ──► stroke into foreground layer (immediate)
//!          │
//!          ▼
//!   TurtleRenderer::request_render() ──► DirtyFlag: Clean → Pending
//!          │                                   │
//!          │              (Pending: coalesced) │ RenderScheduler::schedule()
//!          ▼                                   ▼
//!   ... more commands ...              next tick ──► render(current state)
//!                                                      │
//!                                                      ▼
//!                                      DirtyFlag: Pending → Clean
//! ```
//!
//! **[`turtle`]**: [`Turtle`](turtle::Turtle), the command surface that owns
//! the pen state and delegates drawing to the compositor.
//!
//! **[`state`]**: [`TurtleState`](state::TurtleState), the turtle's pose
//! and pen. The heading is stored in radians; degrees are a
//! read/write-boundary conversion only.
//!
//! **[`renderer`]**: [`TurtleRenderer`](renderer::TurtleRenderer), the
//! compositor owning the foreground layer and the visible surface.
//!
//! **[`dirty`]**: The two-state dirty flag that guarantees at most one
//! outstanding render.
//!
//! **[`scheduler`]**: The [`RenderScheduler`](scheduler::RenderScheduler)
//! trait hosts implement, plus a step-driven
//! [`ManualScheduler`](scheduler::ManualScheduler).
//!
//! **[`surface`]**: The [`DrawSurface`](surface::DrawSurface) contract and
//! surface resolution by identifier.
//!
//! **[`transform`]**: The fixed turtle-space to surface-space mapping and
//! angle-unit conversions.
//!
//! **[`display_list`]**: A recording [`DrawSurface`](surface::DrawSurface)
//! for headless hosts and tests.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! drawing and render instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod dirty;
pub mod display_list;
pub mod error;
pub mod renderer;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod trace;
pub mod transform;
pub mod turtle;

pub use config::TurtleConfig;
pub use error::ConstructionError;
pub use turtle::Turtle;
