// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Angles are
//! printed in degrees.

use std::io::Write;

use tortuga_core::trace::{ClearEvent, RenderEvent, RenderRequestEvent, StrokeEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_stroke(&mut self, e: &StrokeEvent) {
        let _ = writeln!(
            self.writer,
            "[stroke] ({:.2}, {:.2}) -> ({:.2}, {:.2}) width={}",
            e.from.x, e.from.y, e.to.x, e.to.y, e.width,
        );
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        let _ = writeln!(self.writer, "[clear] after frame={}", e.frames_rendered);
    }

    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        let outcome = if e.coalesced { "coalesced" } else { "scheduled" };
        let _ = writeln!(self.writer, "[request] {outcome} frames={}", e.frames_rendered);
    }

    fn on_render(&mut self, e: &RenderEvent) {
        let glyph = if e.glyph_drawn { "shown" } else { "hidden" };
        let _ = writeln!(
            self.writer,
            "[render] frame={} at ({:.2}, {:.2}) heading={:.1}° glyph={glyph}",
            e.frame_index,
            e.position.x,
            e.position.y,
            e.orientation.to_degrees(),
        );
    }
}
