// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless recording surface.
//!
//! [`DisplayList`] implements [`DrawSurface`] by recording every draw call
//! as a [`DrawOp`] in surface (pixel) space instead of rasterizing it. Hosts
//! without a display use it to inspect what a frame would contain, and the
//! crate's tests use it to assert exact stroke geometry.
//!
//! Occlusion is tracked just enough to keep lists bounded: an opaque fill
//! or a clear that covers the whole surface discards every op it hides. A
//! cleared layer therefore compares equal to a freshly created one, and the
//! visible surface only ever holds the most recent frame.
//!
//! [`SurfaceRegistry`] is an in-memory [`SurfaceResolver`] for resolving
//! display lists by name.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Affine, Line, Point, Rect, Size};

use crate::config::TurtleConfig;
use crate::error::ConstructionError;
use crate::surface::{DrawSurface, Glyph, SurfaceResolver};

/// Side length of the default headless turtle glyph.
pub const DEFAULT_SPRITE_SIZE: f64 = 16.0;

/// An 8-bit-per-channel, non-premultiplied color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);

    /// Creates a color from channel values.
    #[inline]
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Returns `true` if the color fully hides what is beneath it.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

/// A named placeholder image with known dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Name used to identify the sprite in recorded ops.
    pub name: String,
    /// Natural size in surface units.
    pub size: Size,
}

impl Sprite {
    /// Creates a sprite.
    #[must_use]
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The built-in headless turtle glyph.
    #[must_use]
    pub fn turtle() -> Self {
        Self::new("turtle", Size::new(DEFAULT_SPRITE_SIZE, DEFAULT_SPRITE_SIZE))
    }
}

impl Glyph for Sprite {
    fn size(&self) -> Size {
        self.size
    }
}

/// One recorded draw call, in surface pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A solid fill. `rect` is the axis-aligned bounds of the filled area.
    Fill {
        /// Filled bounds.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// A region reset to transparent.
    Clear {
        /// Cleared bounds.
        rect: Rect,
    },
    /// A stroked segment.
    Stroke {
        /// Segment endpoints.
        line: Line,
        /// Stroke color.
        color: Rgba,
        /// Stroke width as requested by the caller.
        width: f64,
    },
    /// Another surface's contents blitted at `origin`.
    Layer {
        /// Top-left placement of the blitted surface.
        origin: Point,
        /// Snapshot of the blitted surface's ops.
        ops: Vec<DrawOp>,
    },
    /// An image drawn with a (possibly rotated) transform.
    Image {
        /// The image.
        sprite: Sprite,
        /// Full local-to-surface transform in effect for the draw.
        transform: Affine,
        /// Top-left corner in the image's local space.
        origin: Point,
    },
}

/// A [`DrawSurface`] that records draw calls instead of rasterizing them.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    size: Size,
    transform: Affine,
    stack: Vec<Affine>,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Creates an empty, fully transparent surface.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Returns the recorded ops, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the current transform.
    #[must_use]
    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    /// Iterates over recorded strokes as `(line, color)` pairs.
    pub fn strokes(&self) -> impl Iterator<Item = (Line, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { line, color, .. } => Some((*line, *color)),
            _ => None,
        })
    }

    /// Returns `true` if nothing has been drawn since creation or the last
    /// full clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }

    /// Maps `rect` to surface space and reports whether it hides the whole
    /// surface. Rotated or skewed transforms never count as covering.
    fn device_rect(&self, rect: Rect) -> (Rect, bool) {
        let device = self.transform.transform_rect_bbox(rect);
        let [_, b, c, _, _, _] = self.transform.as_coeffs();
        let bounds = self.bounds();
        let covers = b == 0.0
            && c == 0.0
            && device.x0 <= bounds.x0
            && device.y0 <= bounds.y0
            && device.x1 >= bounds.x1
            && device.y1 >= bounds.y1;
        (device, covers)
    }
}

impl DrawSurface for DisplayList {
    type Color = Rgba;
    type Image = Sprite;

    fn size(&self) -> Size {
        self.size
    }

    fn create_layer(&self) -> Result<Self, ConstructionError> {
        Ok(Self::new(self.size))
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.transform *= affine;
    }

    fn fill_rect(&mut self, rect: Rect, color: &Rgba) {
        let (device, covers) = self.device_rect(rect);
        if covers && color.is_opaque() {
            self.ops.clear();
        }
        self.ops.push(DrawOp::Fill {
            rect: device,
            color: *color,
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        let (device, covers) = self.device_rect(rect);
        if covers {
            self.ops.clear();
        } else {
            self.ops.push(DrawOp::Clear { rect: device });
        }
    }

    fn stroke_line(&mut self, line: Line, color: &Rgba, width: f64) {
        let line = Line::new(self.transform * line.p0, self.transform * line.p1);
        self.ops.push(DrawOp::Stroke {
            line,
            color: *color,
            width,
        });
    }

    fn draw_layer(&mut self, layer: &Self, origin: Point) {
        self.ops.push(DrawOp::Layer {
            origin: self.transform * origin,
            ops: layer.ops.clone(),
        });
    }

    fn draw_image(&mut self, image: &Sprite, origin: Point) {
        self.ops.push(DrawOp::Image {
            sprite: image.clone(),
            transform: self.transform,
            origin,
        });
    }
}

impl TurtleConfig<DisplayList> {
    /// Headless defaults: black pen on white with the built-in sprite.
    #[must_use]
    pub fn display_list() -> Self {
        Self::new(Sprite::turtle(), Rgba::BLACK, Rgba::WHITE)
    }
}

/// What a [`SurfaceRegistry`] holds under a name.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryEntry {
    /// A drawing surface of the given size.
    Surface(Size),
    /// Something that is not a drawing surface, described by its kind.
    Other(String),
}

/// An in-memory [`SurfaceResolver`] producing [`DisplayList`]s.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl SurfaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a drawing surface under `id`.
    pub fn insert_surface(&mut self, id: impl Into<String>, size: Size) -> &mut Self {
        self.entries.insert(id.into(), RegistryEntry::Surface(size));
        self
    }

    /// Registers a non-surface object of the given kind under `id`.
    pub fn insert_other(&mut self, id: impl Into<String>, kind: impl Into<String>) -> &mut Self {
        self.entries
            .insert(id.into(), RegistryEntry::Other(kind.into()));
        self
    }
}

impl SurfaceResolver for SurfaceRegistry {
    type Surface = DisplayList;

    fn resolve(&self, id: &str) -> Result<DisplayList, ConstructionError> {
        match self.entries.get(id) {
            Some(RegistryEntry::Surface(size)) => Ok(DisplayList::new(*size)),
            Some(RegistryEntry::Other(kind)) => Err(ConstructionError::WrongKind {
                id: id.to_string(),
                kind: kind.clone(),
            }),
            None => Err(ConstructionError::NotFound { id: id.to_string() }),
        }
    }
}
