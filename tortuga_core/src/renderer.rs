// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layered compositor.
//!
//! [`TurtleRenderer`] owns the visible surface and a persistent foreground
//! layer. Strokes land in the foreground immediately; the visible frame is
//! only recomposited by [`render`](TurtleRenderer::render), which
//! [`request_render`](TurtleRenderer::request_render) defers to the next
//! scheduler tick and coalesces through a [`DirtyFlag`].
//!
//! The background is not a stored raster: every render starts by filling the
//! visible surface with the state's background color.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, Ref, RefCell};
use core::fmt;

use kurbo::{Affine, Line, Point, Rect, Size};

use crate::dirty::{DirtyFlag, DirtyState};
use crate::error::ConstructionError;
use crate::scheduler::RenderScheduler;
use crate::state::TurtleState;
use crate::surface::{DrawSurface, Glyph};
use crate::trace::{ClearEvent, RenderEvent, RenderRequestEvent, StrokeEvent, Tracer};
use crate::transform::{turtle_extent, turtle_to_surface};

/// Composites a turtle's foreground layer and glyph onto a visible surface.
pub struct TurtleRenderer<S: DrawSurface> {
    surface: RefCell<S>,
    foreground: RefCell<S>,
    /// Turtle space to surface pixels; fixed at construction.
    flip_center: Affine,
    line_width: f64,
    dirty: DirtyFlag,
    scheduler: Rc<dyn RenderScheduler>,
    tracer: RefCell<Tracer>,
    frames: Cell<u64>,
}

impl<S: DrawSurface> TurtleRenderer<S> {
    /// Creates a compositor for `surface`.
    ///
    /// The foreground layer is allocated at the surface's current size and
    /// receives the flip/center transform once, here. No render is performed.
    ///
    /// # Errors
    ///
    /// Propagates the surface's error if the foreground layer cannot be
    /// allocated.
    pub fn new(
        surface: S,
        line_width: f64,
        scheduler: Rc<dyn RenderScheduler>,
    ) -> Result<Self, ConstructionError> {
        let flip_center = turtle_to_surface(surface.size());
        let mut foreground = surface.create_layer()?;
        foreground.transform(flip_center);
        Ok(Self {
            surface: RefCell::new(surface),
            foreground: RefCell::new(foreground),
            flip_center,
            line_width,
            dirty: DirtyFlag::new(),
            scheduler,
            tracer: RefCell::new(Tracer::none()),
            frames: Cell::new(0),
        })
    }

    /// Installs a tracer, replacing the previous one.
    pub fn set_tracer(&self, tracer: Tracer) {
        *self.tracer.borrow_mut() = tracer;
    }

    /// Size of the visible surface.
    #[must_use]
    pub fn size(&self) -> Size {
        self.surface.borrow().size()
    }

    /// Stroke width used for every segment.
    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// The turtle-space to surface-space transform.
    #[must_use]
    pub fn flip_center(&self) -> Affine {
        self.flip_center
    }

    /// Borrows the visible surface.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a [`TraceSink`](crate::trace::TraceSink)
    /// callback while a render is writing the surface.
    #[must_use]
    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// Borrows the foreground layer.
    #[must_use]
    pub fn foreground(&self) -> Ref<'_, S> {
        self.foreground.borrow()
    }

    /// Number of renders completed, including the initial one.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    /// Current dirty-flag state.
    #[must_use]
    pub fn dirty_state(&self) -> DirtyState {
        self.dirty.state()
    }

    /// Returns `true` if a render is queued and has not run yet.
    #[must_use]
    pub fn is_render_pending(&self) -> bool {
        self.dirty.is_pending()
    }

    /// Strokes a turtle-space segment into the foreground layer.
    ///
    /// Does not request a render.
    pub fn stroke_segment(&self, from: Point, to: Point, color: &S::Color) {
        self.foreground
            .borrow_mut()
            .stroke_line(Line::new(from, to), color, self.line_width);
        self.tracer.borrow_mut().stroke(&StrokeEvent {
            from,
            to,
            width: self.line_width,
        });
    }

    /// Erases the foreground layer to fully transparent.
    pub fn clear_foreground(&self) {
        let extent = turtle_extent(self.foreground.borrow().size());
        self.foreground.borrow_mut().clear_rect(extent);
        self.tracer.borrow_mut().clear(&ClearEvent {
            frames_rendered: self.frames.get(),
        });
    }

    /// Recomposites the visible surface from `state` and the foreground.
    ///
    /// Resets the surface to transparent before filling it with the
    /// background color, so no earlier frame shows through a translucent
    /// background. Then blits the foreground at the origin and, if the turtle
    /// is visible, draws the glyph centered on it and rotated to its heading.
    pub fn render(&self, state: &TurtleState<S>) {
        let glyph_drawn = state.is_visible();
        {
            let mut surface = self.surface.borrow_mut();
            let bounds = Rect::from_origin_size(Point::ORIGIN, surface.size());
            surface.clear_rect(bounds);
            surface.fill_rect(bounds, state.background_color());
            surface.draw_layer(&self.foreground.borrow(), Point::ORIGIN);

            if glyph_drawn {
                let glyph = state.turtle_image();
                let half = glyph.size().to_vec2() / 2.0;
                surface.save();
                surface.transform(self.flip_center);
                surface.transform(Affine::translate(state.position().to_vec2()));
                surface.transform(Affine::rotate(state.orientation_radians()));
                surface.draw_image(glyph, Point::ORIGIN - half);
                surface.restore();
            }
        }

        let frame_index = self.frames.get();
        self.frames.set(frame_index + 1);
        self.tracer.borrow_mut().render(&RenderEvent {
            frame_index,
            position: state.position(),
            orientation: state.orientation_radians(),
            glyph_drawn,
        });
    }
}

impl<S: DrawSurface + 'static> TurtleRenderer<S> {
    /// Requests a render of `state` at the next scheduler tick.
    ///
    /// When clean, marks the compositor pending and schedules one task that
    /// renders whatever `state` holds when it runs, then marks it clean.
    /// When already pending, does nothing: the queued render will observe
    /// this change too.
    ///
    /// The task holds the compositor weakly. If every strong handle is gone
    /// by the time it runs, it does nothing.
    pub fn request_render(self: &Rc<Self>, state: &Rc<RefCell<TurtleState<S>>>) {
        let scheduled = self.dirty.mark();
        self.tracer.borrow_mut().render_request(&RenderRequestEvent {
            coalesced: !scheduled,
            frames_rendered: self.frames.get(),
        });
        if !scheduled {
            return;
        }

        let renderer = Rc::downgrade(self);
        let state = Rc::clone(state);
        self.scheduler.schedule(Box::new(move || {
            let Some(renderer) = renderer.upgrade() else {
                return;
            };
            renderer.render(&state.borrow());
            renderer.dirty.clear();
        }));
    }
}

impl<S: DrawSurface> fmt::Debug for TurtleRenderer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurtleRenderer")
            .field("size", &self.size())
            .field("line_width", &self.line_width)
            .field("dirty", &self.dirty.state())
            .field("frames", &self.frames.get())
            .finish_non_exhaustive()
    }
}
