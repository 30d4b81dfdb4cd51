// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas 2D drawing surfaces.
//!
//! [`CanvasSurface`] implements [`DrawSurface`] over an `HtmlCanvasElement`
//! and its `CanvasRenderingContext2d`. Offscreen layers are detached canvases
//! created from the same document. Colors are CSS color strings.
//!
//! Draw calls that throw in JS are ignored: drawing is infallible once a
//! surface exists.

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::{Affine, Line, Point, Rect, Size};
use tortuga_core::ConstructionError;
use tortuga_core::display_list::Rgba;
use tortuga_core::surface::{DrawSurface, Glyph};
use wasm_bindgen::JsCast as _;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// A turtle glyph backed by an `<img>` element.
///
/// The image must be loaded before its first render, otherwise its natural
/// size is zero and nothing is drawn.
#[derive(Clone, Debug)]
pub struct CanvasGlyph(pub HtmlImageElement);

impl Glyph for CanvasGlyph {
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.0.natural_width()),
            f64::from(self.0.natural_height()),
        )
    }
}

/// A canvas element together with its 2D rendering context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl core::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("canvas", &"HtmlCanvasElement")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Wraps `canvas`, acquiring its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::LayerAllocation`] if the canvas cannot
    /// provide a 2D context (for example because it already has a WebGL one).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, ConstructionError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| ConstructionError::LayerAllocation {
                reason: "canvas has no 2d context".to_string(),
            })?;
        Ok(Self { canvas, ctx })
    }

    /// Returns the underlying canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the 2D rendering context.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn detached_canvas(&self) -> Result<HtmlCanvasElement, String> {
        let doc = self
            .canvas
            .owner_document()
            .ok_or_else(|| "canvas has no owner document".to_string())?;
        let layer = doc
            .create_element("canvas")
            .map_err(|_| "create_element(\"canvas\") failed".to_string())?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "created element is not a canvas".to_string())?;
        layer.set_width(self.canvas.width());
        layer.set_height(self.canvas.height());
        Ok(layer)
    }
}

impl DrawSurface for CanvasSurface {
    type Color = String;
    type Image = CanvasGlyph;

    fn size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn create_layer(&self) -> Result<Self, ConstructionError> {
        let layer = self
            .detached_canvas()
            .map_err(|reason| ConstructionError::LayerAllocation { reason })?;
        Self::new(layer)
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn transform(&mut self, affine: Affine) {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        let _ = self.ctx.transform(a, b, c, d, e, f);
    }

    fn fill_rect(&mut self, rect: Rect, color: &String) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_line(&mut self, line: Line, color: &String, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.move_to(line.p0.x, line.p0.y);
        self.ctx.line_to(line.p1.x, line.p1.y);
        self.ctx.stroke();
    }

    fn draw_layer(&mut self, layer: &Self, origin: Point) {
        let _ = self
            .ctx
            .draw_image_with_html_canvas_element(&layer.canvas, origin.x, origin.y);
    }

    fn draw_image(&mut self, image: &CanvasGlyph, origin: Point) {
        let _ = self
            .ctx
            .draw_image_with_html_image_element(&image.0, origin.x, origin.y);
    }
}

/// Formats a color as a CSS `rgba()` string.
#[must_use]
pub fn css_color(color: Rgba) -> String {
    let alpha = f64::from(color.a) / 255.0;
    format!("rgba({}, {}, {}, {alpha})", color.r, color.g, color.b)
}
