// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for drawing and rendering.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! compositor calls as it strokes, clears, schedules, and renders. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] owns an optional boxed [`TraceSink`]. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use kurbo::Point;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a segment is stroked into the foreground layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeEvent {
    /// Segment start, in turtle space.
    pub from: Point,
    /// Segment end, in turtle space.
    pub to: Point,
    /// Stroke width in surface units.
    pub width: f64,
}

/// Emitted when the foreground layer is erased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearEvent {
    /// Renders completed before the clear.
    pub frames_rendered: u64,
}

/// Emitted for every render request, scheduled or coalesced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRequestEvent {
    /// `true` if a render was already pending and this request was absorbed.
    pub coalesced: bool,
    /// Renders completed before the request.
    pub frames_rendered: u64,
}

/// Emitted after each composite of the visible surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderEvent {
    /// Zero-based index of this render; the initial render is frame 0.
    pub frame_index: u64,
    /// Turtle position observed by the render, in turtle space.
    pub position: Point,
    /// Heading observed by the render, in radians.
    pub orientation: f64,
    /// Whether the glyph was drawn.
    pub glyph_drawn: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the compositor.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a segment is stroked.
    fn on_stroke(&mut self, e: &StrokeEvent) {
        _ = e;
    }

    /// Called after the foreground layer is cleared.
    fn on_clear(&mut self, e: &ClearEvent) {
        _ = e;
    }

    /// Called for each render request.
    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        _ = e;
    }

    /// Called after each render.
    fn on_render(&mut self, e: &RenderEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin owning wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink passed to [`new`](Self::new) is dropped immediately. When **on**,
/// each method checks the inner `Option` (one branch) before dispatching to
/// the sink.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::none()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {}
        }
    }

    /// Emits a [`StrokeEvent`].
    #[inline]
    pub fn stroke(&mut self, e: &StrokeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stroke(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClearEvent`].
    #[inline]
    pub fn clear(&mut self, e: &ClearEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clear(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderRequestEvent`].
    #[inline]
    pub fn render_request(&mut self, e: &RenderRequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderEvent`].
    #[inline]
    pub fn render(&mut self, e: &RenderEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
