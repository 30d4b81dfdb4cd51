// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turtle-space geometry and angle units.
//!
//! Turtle space has its origin at the center of the surface and `y`
//! increasing upward. Raster surfaces have their origin at the top-left
//! corner and `y` increasing downward. [`turtle_to_surface`] builds the one
//! fixed affine map between the two; it is established when a compositor is
//! constructed and never changes afterwards.

use core::f64::consts::PI;

use kurbo::{Affine, Rect, Size, Vec2};

const RADIANS_PER_DEGREE: f64 = PI / 180.0;
const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

/// Builds the flip-and-center transform for a surface of the given size.
///
/// Maps turtle-space `(0, 0)` to the surface center and flips the vertical
/// axis so that positive turtle `y` points up on screen.
#[must_use]
pub fn turtle_to_surface(size: Size) -> Affine {
    Affine::scale_non_uniform(1.0, -1.0)
        .then_translate(Vec2::new(size.width / 2.0, size.height / 2.0))
}

/// Returns the full surface extent expressed in turtle space.
///
/// For a `w × h` surface this is `[-w/2, w/2] × [-h/2, h/2]`.
#[must_use]
pub fn turtle_extent(size: Size) -> Rect {
    let hw = size.width / 2.0;
    let hh = size.height / 2.0;
    Rect::new(-hw, -hh, hw, hh)
}

/// Unit in which headings are read and written at the command boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    /// Degrees, counterclockwise from the positive x-axis.
    #[default]
    Degrees,
    /// Radians, counterclockwise from the positive x-axis.
    Radians,
}

impl AngleUnit {
    /// Selects the unit from a "radians mode" flag.
    #[inline]
    #[must_use]
    pub const fn from_radians_mode(radians_mode: bool) -> Self {
        if radians_mode {
            Self::Radians
        } else {
            Self::Degrees
        }
    }

    /// Converts an angle in this unit to radians.
    #[inline]
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle * RADIANS_PER_DEGREE,
            Self::Radians => angle,
        }
    }

    /// Converts an angle in radians to this unit.
    #[inline]
    #[must_use]
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians * DEGREES_PER_RADIAN,
            Self::Radians => radians,
        }
    }
}
