// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace export.
//!
//! [`JsonLinesSink`] writes each event as a single JSON object followed by a
//! newline. Every object carries an `"event"` tag naming its kind; the other
//! keys mirror the event struct's fields, with points as `[x, y]` arrays.
//!
//! Trace hooks cannot fail, so the sink keeps the first write error and
//! stops writing. [`JsonLinesSink::finish`] flushes and reports it.

use std::io::{self, Write};

use serde_json::{Value, json};

use tortuga_core::trace::{ClearEvent, RenderEvent, RenderRequestEvent, StrokeEvent, TraceSink};

/// Writes one JSON object per trace event to a [`Write`](std::io::Write)
/// destination.
pub struct JsonLinesSink<W: Write = Box<dyn Write>> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl JsonLinesSink {
    /// Creates a sink that writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Consumes the sink and returns its writer, unflushed.
    ///
    /// Any recorded write error is discarded; use [`finish`](Self::finish)
    /// to observe it.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Flushes the writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while writing an event, or the flush
    /// error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn emit(&mut self, value: &Value) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, value)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_stroke(&mut self, e: &StrokeEvent) {
        self.emit(&json!({
            "event": "stroke",
            "from": [e.from.x, e.from.y],
            "to": [e.to.x, e.to.y],
            "width": e.width,
        }));
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        self.emit(&json!({
            "event": "clear",
            "frames_rendered": e.frames_rendered,
        }));
    }

    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        self.emit(&json!({
            "event": "render_request",
            "coalesced": e.coalesced,
            "frames_rendered": e.frames_rendered,
        }));
    }

    fn on_render(&mut self, e: &RenderEvent) {
        self.emit(&json!({
            "event": "render",
            "frame_index": e.frame_index,
            "position": [e.position.x, e.position.y],
            "orientation": e.orientation,
            "glyph_drawn": e.glyph_drawn,
        }));
    }
}
