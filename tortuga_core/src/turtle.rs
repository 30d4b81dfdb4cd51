// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The turtle command surface.
//!
//! Every command mutates [`TurtleState`] synchronously. Motion with the pen
//! down strokes the segment into the foreground layer *before* the new
//! position is committed, so any render that runs afterwards sees the stroke
//! together with the move. Commands with a visible effect then ask the
//! compositor for a render, which is coalesced to one per tick.
//!
//! Angle arguments and results use degrees unless radians mode is on.
//! Numeric arguments are never validated; non-finite values propagate into
//! the state as-is.

use alloc::rc::Rc;
use core::cell::{Ref, RefCell};
use core::fmt;

use kurbo::Point;

use crate::config::TurtleConfig;
use crate::error::ConstructionError;
use crate::renderer::TurtleRenderer;
use crate::scheduler::RenderScheduler;
use crate::state::TurtleState;
use crate::surface::{DrawSurface, SurfaceResolver, SurfaceTarget};

/// An oriented pen drawing onto a surface.
///
/// ```rust
/// use tortuga_core::Turtle;
/// use tortuga_core::TurtleConfig;
/// use tortuga_core::display_list::DisplayList;
/// use tortuga_core::scheduler::ManualScheduler;
/// use kurbo::Size;
///
/// let scheduler = ManualScheduler::new();
/// let mut turtle = Turtle::new(
///     DisplayList::new(Size::new(200.0, 200.0)),
///     scheduler.clone(),
///     TurtleConfig::display_list(),
/// )
/// .unwrap();
///
/// turtle.forward(50.0).left(90.0).forward(50.0);
/// scheduler.tick();
///
/// assert_eq!(turtle.renderer().frame_count(), 2);
/// assert_eq!(turtle.renderer().foreground().strokes().count(), 2);
/// ```
pub struct Turtle<S: DrawSurface + 'static> {
    state: Rc<RefCell<TurtleState<S>>>,
    renderer: Rc<TurtleRenderer<S>>,
}

impl<S: DrawSurface + 'static> Turtle<S> {
    /// Creates a turtle drawing onto `surface` and renders the first frame.
    ///
    /// # Errors
    ///
    /// Returns the surface's [`ConstructionError`] if the foreground layer
    /// cannot be allocated.
    pub fn new<R>(
        surface: S,
        scheduler: R,
        config: TurtleConfig<S>,
    ) -> Result<Self, ConstructionError>
    where
        R: RenderScheduler + 'static,
    {
        let renderer = TurtleRenderer::new(surface, config.line_width, Rc::new(scheduler))?;
        let state = TurtleState::new(config);
        renderer.render(&state);
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            renderer: Rc::new(renderer),
        })
    }

    /// Creates a turtle on the surface registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] or
    /// [`ConstructionError::WrongKind`] from the resolver, or a layer
    /// allocation error from the surface.
    pub fn from_id<Res, R>(
        resolver: &Res,
        id: &str,
        scheduler: R,
        config: TurtleConfig<S>,
    ) -> Result<Self, ConstructionError>
    where
        Res: SurfaceResolver<Surface = S>,
        R: RenderScheduler + 'static,
    {
        Self::new(resolver.resolve(id)?, scheduler, config)
    }

    /// Creates a turtle from either a surface or an identifier.
    ///
    /// # Errors
    ///
    /// See [`from_id`](Self::from_id).
    pub fn make<Res, R>(
        target: SurfaceTarget<'_, S>,
        resolver: &Res,
        scheduler: R,
        config: TurtleConfig<S>,
    ) -> Result<Self, ConstructionError>
    where
        Res: SurfaceResolver<Surface = S>,
        R: RenderScheduler + 'static,
    {
        Self::new(target.into_surface(resolver)?, scheduler, config)
    }

    // --- Motion -----------------------------------------------------------

    /// Moves `distance` along the heading.
    pub fn forward(&mut self, distance: f64) -> &mut Self {
        let to = self.state.borrow().advanced(distance);
        self.move_to_point(to)
    }

    /// Moves `distance` against the heading.
    pub fn back(&mut self, distance: f64) -> &mut Self {
        let to = self.state.borrow().advanced(-distance);
        self.move_to_point(to)
    }

    /// Moves to an absolute turtle-space position.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.move_to_point(Point::new(x, y))
    }

    /// Faces `+x`, then moves to the origin.
    pub fn home(&mut self) -> &mut Self {
        self.state.borrow_mut().orientation = 0.0;
        self.move_to_point(Point::ORIGIN)
    }

    fn move_to_point(&mut self, to: Point) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            if state.pen_down {
                self.renderer
                    .stroke_segment(state.position(), to, &state.pen_color);
            }
            state.x = to.x;
            state.y = to.y;
        }
        self.request_render()
    }

    // --- Rotation ---------------------------------------------------------

    /// Turns counterclockwise by `angle`.
    pub fn left(&mut self, angle: f64) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            let delta = state.angle_unit().to_radians(angle);
            state.orientation += delta;
        }
        self.request_render()
    }

    /// Turns clockwise by `angle`.
    pub fn right(&mut self, angle: f64) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            let delta = state.angle_unit().to_radians(angle);
            state.orientation -= delta;
        }
        self.request_render()
    }

    /// Sets the absolute heading.
    pub fn set_orientation(&mut self, angle: f64) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            let heading = state.angle_unit().to_radians(angle);
            state.orientation = heading;
        }
        self.request_render()
    }

    // --- Pen --------------------------------------------------------------

    /// Stops stroking on motion.
    pub fn pen_up(&mut self) -> &mut Self {
        self.state.borrow_mut().pen_down = false;
        self
    }

    /// Resumes stroking on motion.
    pub fn pen_down(&mut self) -> &mut Self {
        self.state.borrow_mut().pen_down = true;
        self
    }

    /// Sets the color of future strokes.
    ///
    /// Existing strokes keep their color, so no render is requested.
    pub fn color(&mut self, color: S::Color) -> &mut Self {
        self.state.borrow_mut().pen_color = color;
        self
    }

    // --- Appearance -------------------------------------------------------

    /// Sets the background fill color.
    pub fn background(&mut self, color: S::Color) -> &mut Self {
        self.state.borrow_mut().background_color = color;
        self.request_render()
    }

    /// Draws the glyph.
    pub fn show(&mut self) -> &mut Self {
        self.state.borrow_mut().visible = true;
        self.request_render()
    }

    /// Stops drawing the glyph. Motion still strokes.
    pub fn hide(&mut self) -> &mut Self {
        self.state.borrow_mut().visible = false;
        self.request_render()
    }

    /// Replaces this turtle's glyph.
    pub fn set_turtle_image(&mut self, image: S::Image) -> &mut Self {
        self.state.borrow_mut().turtle_image = image;
        self.request_render()
    }

    /// Erases every stroke. Position, heading, and pen are unchanged.
    pub fn clear(&mut self) -> &mut Self {
        self.renderer.clear_foreground();
        self.request_render()
    }

    // --- Units ------------------------------------------------------------

    /// Selects radians (`true`) or degrees (`false`) for angles.
    ///
    /// The stored heading is unaffected.
    pub fn set_radians_mode(&mut self, radians_mode: bool) -> &mut Self {
        self.state.borrow_mut().radians_mode = radians_mode;
        self
    }

    /// Reads and writes angles in degrees.
    pub fn degrees(&mut self) -> &mut Self {
        self.set_radians_mode(false)
    }

    /// Reads and writes angles in radians.
    pub fn radians(&mut self) -> &mut Self {
        self.set_radians_mode(true)
    }

    // --- Control ----------------------------------------------------------

    /// Calls `action` `n` times in order. Does nothing if `n < 1`.
    pub fn repeat<F>(&mut self, n: i32, mut action: F) -> &mut Self
    where
        F: FnMut(&mut Self),
    {
        for _ in 0..n {
            action(self);
        }
        self
    }

    // --- Aliases ----------------------------------------------------------

    /// Alias for [`forward`](Self::forward).
    pub fn fd(&mut self, distance: f64) -> &mut Self {
        self.forward(distance)
    }

    /// Alias for [`back`](Self::back).
    pub fn bk(&mut self, distance: f64) -> &mut Self {
        self.back(distance)
    }

    /// Alias for [`left`](Self::left).
    pub fn lt(&mut self, angle: f64) -> &mut Self {
        self.left(angle)
    }

    /// Alias for [`right`](Self::right).
    pub fn rt(&mut self, angle: f64) -> &mut Self {
        self.right(angle)
    }

    /// Alias for [`background`](Self::background).
    pub fn bg(&mut self, color: S::Color) -> &mut Self {
        self.background(color)
    }

    /// Alias for [`show`](Self::show).
    pub fn st(&mut self) -> &mut Self {
        self.show()
    }

    /// Alias for [`hide`](Self::hide).
    pub fn ht(&mut self) -> &mut Self {
        self.hide()
    }

    /// Alias for [`pen_up`](Self::pen_up).
    pub fn pu(&mut self) -> &mut Self {
        self.pen_up()
    }

    /// Alias for [`pen_down`](Self::pen_down).
    pub fn pd(&mut self) -> &mut Self {
        self.pen_down()
    }

    /// Alias for [`move_to`](Self::move_to).
    pub fn goto(&mut self, x: f64, y: f64) -> &mut Self {
        self.move_to(x, y)
    }

    /// Alias for [`set_orientation`](Self::set_orientation).
    pub fn seth(&mut self, angle: f64) -> &mut Self {
        self.set_orientation(angle)
    }

    // --- Queries ----------------------------------------------------------

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.state.borrow().x()
    }

    /// Vertical position (positive is up).
    #[must_use]
    pub fn y(&self) -> f64 {
        self.state.borrow().y()
    }

    /// Position as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        self.state.borrow().position()
    }

    /// Heading in the current angle unit.
    #[must_use]
    pub fn orientation(&self) -> f64 {
        self.state.borrow().orientation()
    }

    /// Whether motion strokes.
    #[must_use]
    pub fn is_pen_down(&self) -> bool {
        self.state.borrow().is_pen_down()
    }

    /// Whether the glyph is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    /// Whether angles are in radians.
    #[must_use]
    pub fn radians_mode(&self) -> bool {
        self.state.borrow().radians_mode()
    }

    /// Current stroke color.
    #[must_use]
    pub fn pen_color(&self) -> S::Color {
        self.state.borrow().pen_color().clone()
    }

    /// Current background color.
    #[must_use]
    pub fn background_color(&self) -> S::Color {
        self.state.borrow().background_color().clone()
    }

    /// Borrows the full state.
    #[must_use]
    pub fn state(&self) -> Ref<'_, TurtleState<S>> {
        self.state.borrow()
    }

    /// The compositor, for surface access and tracing.
    #[must_use]
    pub fn renderer(&self) -> &Rc<TurtleRenderer<S>> {
        &self.renderer
    }

    fn request_render(&mut self) -> &mut Self {
        self.renderer.request_render(&self.state);
        self
    }
}

impl<S: DrawSurface + 'static> fmt::Debug for Turtle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("state", &*self.state.borrow())
            .field("renderer", &self.renderer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Line, Size};

    use super::*;
    use crate::display_list::{DisplayList, DrawOp, Rgba, Sprite};
    use crate::scheduler::ManualScheduler;

    fn turtle() -> (Turtle<DisplayList>, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let turtle = Turtle::new(
            DisplayList::new(Size::new(200.0, 200.0)),
            scheduler.clone(),
            TurtleConfig::display_list(),
        )
        .unwrap();
        (turtle, scheduler)
    }

    fn strokes(turtle: &Turtle<DisplayList>) -> Vec<(Line, Rgba)> {
        turtle.renderer().foreground().strokes().collect()
    }

    #[test]
    fn construction_renders_once() {
        let (turtle, scheduler) = turtle();
        assert_eq!(turtle.renderer().frame_count(), 1);
        assert_eq!(scheduler.pending(), 0);
        assert!(!turtle.renderer().is_render_pending());
    }

    #[test]
    fn pen_up_moves_without_stroking() {
        let (mut turtle, _) = turtle();
        turtle.pen_up().forward(30.0).pen_down();
        assert!(strokes(&turtle).is_empty());
        assert_eq!(turtle.position(), Point::new(30.0, 0.0));
    }

    #[test]
    fn pen_toggles_and_color_do_not_request_render() {
        let (mut turtle, scheduler) = turtle();
        turtle.pen_up().pen_down().color(Rgba::from_rgb8(255, 0, 0));
        assert_eq!(scheduler.pending(), 0);
        assert!(!turtle.renderer().is_render_pending());
    }

    #[test]
    fn color_applies_to_later_strokes() {
        let (mut turtle, _) = turtle();
        let red = Rgba::from_rgb8(255, 0, 0);
        turtle.forward(10.0).color(red).forward(10.0);
        let colors: Vec<_> = strokes(&turtle).into_iter().map(|(_, c)| c).collect();
        assert_eq!(colors, [Rgba::BLACK, red]);
        assert_eq!(turtle.pen_color(), red);
    }

    #[test]
    fn appearance_changes_request_render() {
        let (mut turtle, scheduler) = turtle();
        turtle.background(Rgba::BLACK);
        assert_eq!(scheduler.pending(), 1);
        scheduler.tick();
        turtle.hide();
        assert_eq!(scheduler.pending(), 1);
        scheduler.tick();
        turtle.show();
        assert_eq!(scheduler.pending(), 1);
        scheduler.tick();
        turtle.set_turtle_image(Sprite::new("arrow", Size::new(4.0, 4.0)));
        assert_eq!(scheduler.pending(), 1);
        scheduler.tick();
        assert_eq!(turtle.renderer().frame_count(), 5);
    }

    #[test]
    fn set_turtle_image_is_per_turtle() {
        let (mut a, sa) = turtle();
        let (b, sb) = turtle();
        a.set_turtle_image(Sprite::new("arrow", Size::new(4.0, 4.0)));
        sa.tick();
        sb.tick();

        let glyph = |t: &Turtle<DisplayList>| {
            t.renderer()
                .surface()
                .ops()
                .iter()
                .find_map(|op| match op {
                    DrawOp::Image { sprite, .. } => Some(sprite.name.clone()),
                    _ => None,
                })
        };
        assert_eq!(glyph(&a).as_deref(), Some("arrow"));
        assert_eq!(glyph(&b).as_deref(), Some("turtle"));
    }

    #[test]
    fn hidden_turtle_still_strokes() {
        let (mut turtle, _) = turtle();
        turtle.hide().forward(10.0);
        assert_eq!(strokes(&turtle).len(), 1);
        assert!(!turtle.is_visible());
    }

    #[test]
    fn move_to_strokes_absolute_segment() {
        let (mut turtle, _) = turtle();
        turtle.move_to(-20.0, 40.0);
        assert_eq!(
            strokes(&turtle),
            [(Line::new((100.0, 100.0), (80.0, 60.0)), Rgba::BLACK)]
        );
    }

    #[test]
    fn set_orientation_uses_current_unit() {
        let (mut turtle, _) = turtle();
        turtle.set_orientation(180.0);
        assert!((turtle.orientation() - 180.0).abs() < 1e-9);
        turtle.radians().seth(0.5);
        assert_eq!(turtle.orientation(), 0.5);
        assert_eq!(turtle.state().orientation_radians(), 0.5);
    }

    #[test]
    fn unit_toggle_keeps_stored_heading() {
        let (mut turtle, scheduler) = turtle();
        turtle.left(30.0);
        scheduler.tick();
        let before = turtle.state().orientation_radians();
        turtle.radians().degrees().set_radians_mode(true);
        assert_eq!(turtle.state().orientation_radians(), before);
        assert!(turtle.radians_mode());
        assert_eq!(scheduler.pending(), 0, "unit changes never redraw");
    }

    #[test]
    fn aliases_match_commands() {
        let (mut a, _) = turtle();
        let (mut b, _) = turtle();
        a.forward(12.0)
            .left(30.0)
            .back(3.0)
            .right(75.0)
            .pen_up()
            .move_to(5.0, 6.0)
            .pen_down()
            .set_orientation(10.0)
            .forward(1.0)
            .hide()
            .background(Rgba::BLACK);
        b.fd(12.0)
            .lt(30.0)
            .bk(3.0)
            .rt(75.0)
            .pu()
            .goto(5.0, 6.0)
            .pd()
            .seth(10.0)
            .fd(1.0)
            .ht()
            .bg(Rgba::BLACK);
        assert_eq!(a.state().position(), b.state().position());
        assert_eq!(
            a.state().orientation_radians(),
            b.state().orientation_radians()
        );
        assert_eq!(strokes(&a), strokes(&b));
        assert_eq!(a.is_visible(), b.is_visible());
        b.st();
        assert!(b.is_visible());
    }

    #[test]
    fn repeat_counts() {
        let (mut turtle, _) = turtle();
        let mut calls = 0;
        turtle.repeat(3, |_| calls += 1);
        assert_eq!(calls, 3);

        calls = 0;
        turtle.repeat(0, |_| calls += 1);
        turtle.repeat(-2, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn non_finite_arguments_propagate() {
        let (mut turtle, _) = turtle();
        turtle.forward(f64::NAN);
        assert!(turtle.x().is_nan());
        turtle.home();
        assert_eq!(turtle.position(), Point::ORIGIN);
        turtle.left(f64::INFINITY);
        assert!(!turtle.orientation().is_finite());
    }
}
