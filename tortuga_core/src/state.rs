// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turtle motion, pen, and appearance state.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::config::TurtleConfig;
use crate::surface::DrawSurface;
use crate::transform::AngleUnit;

/// Everything a turtle knows about itself.
///
/// Positions are in turtle space: origin at the surface center, `y` up.
/// The heading is stored canonically in radians, counterclockwise from the
/// positive x-axis; [`AngleUnit`] conversions happen only at the command
/// boundary. Headings are never normalized into `[0, 2π)` because they are
/// only ever consumed through `cos`/`sin`.
pub struct TurtleState<S: DrawSurface> {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) orientation: f64,
    pub(crate) pen_down: bool,
    pub(crate) visible: bool,
    pub(crate) pen_color: S::Color,
    pub(crate) background_color: S::Color,
    pub(crate) turtle_image: S::Image,
    pub(crate) radians_mode: bool,
}

impl<S: DrawSurface> TurtleState<S> {
    /// Creates the initial state at the origin, heading along `+x`.
    #[must_use]
    pub fn new(config: TurtleConfig<S>) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            orientation: 0.0,
            pen_down: true,
            visible: config.visible,
            pen_color: config.pen_color,
            background_color: config.background_color,
            turtle_image: config.turtle_image,
            radians_mode: config.radians_mode,
        }
    }

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position (positive is up).
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Heading in the canonical unit (radians).
    #[must_use]
    pub fn orientation_radians(&self) -> f64 {
        self.orientation
    }

    /// Heading in the unit selected by [`radians_mode`](Self::radians_mode).
    #[must_use]
    pub fn orientation(&self) -> f64 {
        self.angle_unit().from_radians(self.orientation)
    }

    /// Unit vector along the current heading.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.orientation.cos(), self.orientation.sin())
    }

    /// Whether motion strokes segments.
    #[must_use]
    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Whether the glyph is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Color used for future strokes.
    #[must_use]
    pub fn pen_color(&self) -> &S::Color {
        &self.pen_color
    }

    /// Color the visible surface is filled with on every render.
    #[must_use]
    pub fn background_color(&self) -> &S::Color {
        &self.background_color
    }

    /// Whether angles are read and written in radians rather than degrees.
    #[must_use]
    pub fn radians_mode(&self) -> bool {
        self.radians_mode
    }

    /// Unit for angle arguments and results.
    #[must_use]
    pub fn angle_unit(&self) -> AngleUnit {
        AngleUnit::from_radians_mode(self.radians_mode)
    }

    pub(crate) fn turtle_image(&self) -> &S::Image {
        &self.turtle_image
    }

    /// Position reached by travelling `distance` along the heading.
    pub(crate) fn advanced(&self, distance: f64) -> Point {
        self.position() + self.heading() * distance
    }
}

impl<S: DrawSurface> fmt::Debug for TurtleState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurtleState")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("orientation", &self.orientation)
            .field("pen_down", &self.pen_down)
            .field("visible", &self.visible)
            .field("pen_color", &self.pen_color)
            .field("background_color", &self.background_color)
            .field("turtle_image", &self.turtle_image)
            .field("radians_mode", &self.radians_mode)
            .finish()
    }
}
