// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.
//!
//! The default glyph is part of the configuration rather than a process-wide
//! value: each turtle receives its own copy at construction, and replacing it
//! later affects that turtle only.

use core::fmt;

use crate::surface::DrawSurface;

/// Stroke width used when none is configured, in surface units.
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;

/// Initial appearance and rendering parameters for a turtle.
pub struct TurtleConfig<S: DrawSurface> {
    /// Glyph drawn at the turtle's position.
    pub turtle_image: S::Image,
    /// Initial stroke color.
    pub pen_color: S::Color,
    /// Initial background fill color.
    pub background_color: S::Color,
    /// Stroke width for every segment, fixed for the compositor's lifetime.
    pub line_width: f64,
    /// Read and write angles in radians instead of degrees.
    pub radians_mode: bool,
    /// Whether the glyph starts visible.
    pub visible: bool,
}

impl<S: DrawSurface> TurtleConfig<S> {
    /// Creates a configuration with the default line width, degree mode, and
    /// a visible glyph.
    #[must_use]
    pub fn new(turtle_image: S::Image, pen_color: S::Color, background_color: S::Color) -> Self {
        Self {
            turtle_image,
            pen_color,
            background_color,
            line_width: DEFAULT_LINE_WIDTH,
            radians_mode: false,
            visible: true,
        }
    }

    /// Sets the stroke width.
    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    /// Selects radians (`true`) or degrees (`false`) for angles.
    #[must_use]
    pub fn with_radians_mode(mut self, radians_mode: bool) -> Self {
        self.radians_mode = radians_mode;
        self
    }

    /// Sets whether the glyph starts visible.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

impl<S: DrawSurface> Clone for TurtleConfig<S>
where
    S::Image: Clone,
{
    fn clone(&self) -> Self {
        Self {
            turtle_image: self.turtle_image.clone(),
            pen_color: self.pen_color.clone(),
            background_color: self.background_color.clone(),
            line_width: self.line_width,
            radians_mode: self.radians_mode,
            visible: self.visible,
        }
    }
}

impl<S: DrawSurface> fmt::Debug for TurtleConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurtleConfig")
            .field("turtle_image", &self.turtle_image)
            .field("pen_color", &self.pen_color)
            .field("background_color", &self.background_color)
            .field("line_width", &self.line_width)
            .field("radians_mode", &self.radians_mode)
            .field("visible", &self.visible)
            .finish()
    }
}
