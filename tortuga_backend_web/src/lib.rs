// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for tortuga.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`CanvasSurface`]: a canvas 2D [`DrawSurface`](tortuga_core::surface::DrawSurface)
//! - [`DocumentResolver`]: canvas lookup by DOM id
//! - [`RafScheduler`]: `requestAnimationFrame` render scheduling
//!
//! ```rust,no_run
//! use tortuga_backend_web::{CanvasGlyph, DocumentResolver, make_turtle};
//! use tortuga_core::surface::SurfaceTarget;
//! # fn glyph() -> CanvasGlyph { unimplemented!() }
//!
//! let resolver = DocumentResolver::from_window().unwrap();
//! let mut turtle = make_turtle(&resolver, SurfaceTarget::Id("canvas"), glyph()).unwrap();
//! turtle.repeat(4, |t| {
//!     t.forward(50.0).left(90.0);
//! });
//! ```

#![no_std]

extern crate alloc;

mod canvas;
mod raf;
mod resolver;

pub use canvas::{CanvasGlyph, CanvasSurface, css_color};
pub use raf::RafScheduler;
pub use resolver::DocumentResolver;

use alloc::string::ToString;

use tortuga_core::surface::SurfaceTarget;
use tortuga_core::{ConstructionError, Turtle, TurtleConfig};

/// Browser defaults: black pen on a white background with the given glyph.
#[must_use]
pub fn default_config(glyph: CanvasGlyph) -> TurtleConfig<CanvasSurface> {
    TurtleConfig::new(glyph, "black".to_string(), "white".to_string())
}

/// Creates a turtle on a canvas (or the canvas with the given id) that
/// redraws on animation frames.
///
/// # Errors
///
/// Returns [`ConstructionError::NotFound`] if no element has the id,
/// [`ConstructionError::WrongKind`] if the element is not a `<canvas>`, or
/// [`ConstructionError::LayerAllocation`] if a 2D context or offscreen layer
/// is unavailable.
pub fn make_turtle(
    resolver: &DocumentResolver,
    target: SurfaceTarget<'_, CanvasSurface>,
    glyph: CanvasGlyph,
) -> Result<Turtle<CanvasSurface>, ConstructionError> {
    Turtle::make(target, resolver, RafScheduler::new(), default_config(glyph))
}
