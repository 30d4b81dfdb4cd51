// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing-surface contract for platform integrations.
//!
//! The compositor never touches pixels directly. It drives a [`DrawSurface`]
//! supplied by a backend crate (a canvas 2D context, a CPU pixmap, the
//! headless [`DisplayList`](crate::display_list::DisplayList), ...). The same
//! surface type serves as both the visible target and the offscreen layers
//! created from it with [`DrawSurface::create_layer`].
//!
//! Surfaces may also be looked up by identifier through a
//! [`SurfaceResolver`], which is how hosts map a DOM id (or window name, or
//! registry key) onto a surface.

use core::fmt::Debug;

use kurbo::{Affine, Line, Point, Rect, Size};

use crate::error::ConstructionError;

/// A drawable resource with known dimensions, used as the turtle glyph.
pub trait Glyph {
    /// Returns the glyph's natural size in surface units.
    fn size(&self) -> Size;
}

/// A raster target the compositor can draw onto.
///
/// All geometry is passed in the surface's *current* coordinate system, as
/// established by [`transform`](Self::transform) calls since the last
/// [`save`](Self::save). Implementations map it to pixels.
pub trait DrawSurface: Sized {
    /// Any value the surface accepts as a fill or stroke style.
    type Color: Clone + Debug;

    /// Drawable image resource (the turtle glyph).
    type Image: Glyph + Debug;

    /// Returns the surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Creates a fully transparent offscreen layer with the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::LayerAllocation`] if the backend cannot
    /// allocate the layer.
    fn create_layer(&self) -> Result<Self, ConstructionError>;

    /// Pushes the current transform onto the transform stack.
    fn save(&mut self);

    /// Pops the transform stack. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Concatenates `affine` onto the current transform.
    ///
    /// Subsequent geometry is first mapped by `affine`, then by the
    /// previously established transform.
    fn transform(&mut self, affine: Affine);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: &Self::Color);

    /// Resets the pixels under `rect` to fully transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Strokes a single line segment.
    fn stroke_line(&mut self, line: Line, color: &Self::Color, width: f64);

    /// Blits another surface's pixels with its top-left corner at `origin`.
    fn draw_layer(&mut self, layer: &Self, origin: Point);

    /// Draws `image` with its top-left corner at `origin`.
    fn draw_image(&mut self, image: &Self::Image, origin: Point);
}

/// Looks up drawing surfaces by identifier.
pub trait SurfaceResolver {
    /// The surface type this resolver produces.
    type Surface: DrawSurface;

    /// Resolves `id` to a drawing surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] if nothing is registered under
    /// `id`, or [`ConstructionError::WrongKind`] if the object found is not a
    /// drawing surface.
    fn resolve(&self, id: &str) -> Result<Self::Surface, ConstructionError>;
}

/// Either a surface handle or an identifier to resolve one.
#[derive(Debug)]
pub enum SurfaceTarget<'a, S> {
    /// Draw onto this surface directly.
    Surface(S),
    /// Resolve the surface by identifier.
    Id(&'a str),
}

impl<S> From<S> for SurfaceTarget<'_, S>
where
    S: DrawSurface,
{
    fn from(surface: S) -> Self {
        Self::Surface(surface)
    }
}

impl<'a, S> SurfaceTarget<'a, S>
where
    S: DrawSurface,
{
    /// Produces the surface, consulting `resolver` for identifiers.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's [`ConstructionError`].
    pub fn into_surface<R>(self, resolver: &R) -> Result<S, ConstructionError>
    where
        R: SurfaceResolver<Surface = S>,
    {
        match self {
            Self::Surface(surface) => Ok(surface),
            Self::Id(id) => resolver.resolve(id),
        }
    }
}
