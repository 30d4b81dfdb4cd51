// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of turtles on a headless display list.

use std::f64::consts::PI;

use kurbo::{Affine, Line, Point, Rect, Size};
use tortuga_core::display_list::{DisplayList, DrawOp, Rgba, SurfaceRegistry};
use tortuga_core::scheduler::ManualScheduler;
use tortuga_core::surface::{DrawSurface, Glyph, SurfaceTarget};
use tortuga_core::{ConstructionError, Turtle, TurtleConfig};

const EPS: f64 = 1e-9;

fn turtle(size: Size) -> (Turtle<DisplayList>, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let turtle = Turtle::new(
        DisplayList::new(size),
        scheduler.clone(),
        TurtleConfig::display_list(),
    )
    .unwrap();
    (turtle, scheduler)
}

fn square() -> (Turtle<DisplayList>, ManualScheduler) {
    turtle(Size::new(200.0, 200.0))
}

fn strokes(turtle: &Turtle<DisplayList>) -> Vec<Line> {
    turtle
        .renderer()
        .foreground()
        .strokes()
        .map(|(line, _)| line)
        .collect()
}

fn glyph_center(turtle: &Turtle<DisplayList>) -> Option<Point> {
    turtle
        .renderer()
        .surface()
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::Image { transform, .. } => Some(*transform * Point::ORIGIN),
            _ => None,
        })
}

#[test]
fn forward_then_back_restores_position() {
    for (heading, distance) in [(0.0, 37.5), (30.0, 10.0), (135.0, 0.1), (-60.0, 1e6)] {
        let (mut t, _) = square();
        t.set_orientation(heading);
        let before = t.state().orientation_radians();
        t.forward(distance).back(distance);
        assert_eq!(t.position(), Point::ORIGIN, "heading {heading}");
        assert_eq!(t.state().orientation_radians(), before);
    }

    let (mut t, _) = square();
    t.pen_up().move_to(12.25, -3.5).set_orientation(90.0);
    t.forward(8.0).back(8.0);
    assert_eq!(t.position(), Point::new(12.25, -3.5));
}

#[test]
fn left_then_right_restores_orientation() {
    for angle in [0.0, 1.0, 45.0, 90.0, 359.5, -720.25] {
        let (mut t, _) = square();
        t.left(angle).right(angle);
        assert_eq!(t.state().orientation_radians(), 0.0, "angle {angle}");
    }

    let (mut t, _) = square();
    t.radians().seth(1.5).left(0.25).right(0.25);
    assert_eq!(t.orientation(), 1.5);
}

#[test]
fn degree_reading_is_radians_times_180_over_pi() {
    let (mut t, _) = square();
    let check = |t: &Turtle<DisplayList>| {
        let radians = t.state().orientation_radians();
        assert_eq!(t.state().angle_unit().from_radians(radians), t.orientation());
        let degrees = if t.radians_mode() {
            t.orientation() * (180.0 / PI)
        } else {
            t.orientation()
        };
        assert_eq!(degrees, radians * (180.0 / PI));
    };

    check(&t);
    t.left(33.0);
    check(&t);
    t.radians();
    check(&t);
    t.left(0.5);
    check(&t);
    t.degrees();
    check(&t);
    t.right(12.0);
    check(&t);
}

#[test]
fn toggling_units_keeps_stored_heading() {
    let (mut t, _) = square();
    t.left(72.0);
    let stored = t.state().orientation_radians();
    t.radians();
    assert_eq!(t.state().orientation_radians(), stored);
    assert_eq!(t.orientation(), stored);
    t.degrees();
    assert_eq!(t.state().orientation_radians(), stored);
}

#[test]
fn repeated_square_closes() {
    for side in [1.0, 50.0, 333.3] {
        let (mut t, _) = square();
        t.repeat(4, |t| {
            t.forward(side).left(90.0);
        });
        let p = t.position();
        assert!(p.x.abs() < EPS && p.y.abs() < EPS, "side {side}: {p:?}");

        let heading = t.state().heading();
        assert!((heading.x - 1.0).abs() < EPS, "side {side}: {heading:?}");
        assert!(heading.y.abs() < EPS, "side {side}: {heading:?}");
        assert_eq!(strokes(&t).len(), 4);
    }
}

#[test]
fn clear_matches_fresh_compositor() {
    let (mut t, scheduler) = square();
    t.forward(40.0).left(120.0).forward(40.0).clear();
    scheduler.tick();

    let (fresh, _) = square();
    assert_eq!(*t.renderer().foreground(), *fresh.renderer().foreground());
    match &t.renderer().surface().ops()[1] {
        DrawOp::Layer { ops, .. } => assert!(ops.is_empty(), "residual strokes: {ops:?}"),
        other => panic!("expected foreground blit, got {other:?}"),
    }

    // Position and pen survive the clear.
    assert_ne!(t.position(), Point::ORIGIN);
    assert!(t.is_pen_down());
}

#[test]
fn many_commands_produce_one_render_of_final_state() {
    let (mut t, scheduler) = square();
    let frames_before = t.renderer().frame_count();

    t.forward(10.0)
        .left(90.0)
        .forward(20.0)
        .background(Rgba::from_rgb8(0, 0, 255))
        .hide()
        .show()
        .move_to(30.0, -10.0);
    t.repeat(5, |t| {
        t.right(72.0);
    });

    assert_eq!(scheduler.pending(), 1, "requests must coalesce");
    assert_eq!(t.renderer().frame_count(), frames_before);

    assert_eq!(scheduler.tick(), 1);
    assert_eq!(t.renderer().frame_count(), frames_before + 1);
    assert!(!t.renderer().is_render_pending());

    let surface = t.renderer().surface();
    assert_eq!(
        surface.ops()[0],
        DrawOp::Fill {
            rect: Rect::new(0.0, 0.0, 200.0, 200.0),
            color: Rgba::from_rgb8(0, 0, 255),
        }
    );
    drop(surface);
    assert_eq!(glyph_center(&t), Some(Point::new(130.0, 110.0)));

    assert_eq!(scheduler.tick(), 0, "nothing left to render");
}

#[test]
fn translucent_background_does_not_accumulate_frames() {
    let (mut t, scheduler) = square();
    t.background(Rgba::from_rgba8(255, 255, 255, 128));
    for _ in 0..50 {
        t.forward(1.0);
        scheduler.tick();
    }

    let renderer = t.renderer();
    let surface = renderer.surface();
    let glyphs = surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Image { .. }))
        .count();
    assert_eq!(glyphs, 1, "stale glyphs: {:?}", surface.ops());
    assert_eq!(surface.ops().len(), 3);
    assert!(matches!(
        surface.ops()[0],
        DrawOp::Fill { color, .. } if color == Rgba::from_rgba8(255, 255, 255, 128)
    ));
}

#[test]
fn home_strokes_once_and_faces_east() {
    let (mut t, _) = square();
    t.pen_up().move_to(30.0, 40.0).left(123.0).pen_down();
    assert!(strokes(&t).is_empty());

    t.home();
    assert_eq!(strokes(&t), [Line::new((130.0, 60.0), (100.0, 100.0))]);
    assert_eq!(t.state().orientation_radians(), 0.0);
    assert_eq!(t.position(), Point::ORIGIN);
}

#[test]
fn two_segment_scenario() {
    let (mut t, scheduler) = square();
    t.forward(50.0).left(90.0).forward(50.0);
    scheduler.tick();

    assert!((t.x() - 50.0).abs() < EPS);
    assert!((t.y() - 50.0).abs() < EPS);
    assert!((t.orientation() - 90.0).abs() < EPS);

    // Turtle space (0,0)→(50,0)→(50,50) on a 200×200 surface.
    let lines = strokes(&t);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], Line::new((100.0, 100.0), (150.0, 100.0)));
    assert!((lines[1].p0 - Point::new(150.0, 100.0)).hypot() < EPS);
    assert!((lines[1].p1 - Point::new(150.0, 50.0)).hypot() < EPS);
}

#[test]
fn pen_up_draws_nothing_and_color_does_not_redraw() {
    let (mut t, scheduler) = square();
    t.pen_up();
    t.forward(25.0).back(5.0).home();
    assert!(strokes(&t).is_empty());

    scheduler.tick();
    t.color(Rgba::from_rgb8(9, 9, 9)).pen_down().pen_up();
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn repeat_non_positive_is_noop() {
    let (mut t, scheduler) = square();
    t.repeat(0, |t| {
        t.forward(10.0);
    });
    t.repeat(-3, |t| {
        t.forward(10.0);
    });
    assert_eq!(t.position(), Point::ORIGIN);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn construction_by_identifier() {
    let mut registry = SurfaceRegistry::new();
    registry
        .insert_surface("canvas", Size::new(64.0, 32.0))
        .insert_other("caption", "paragraph");

    let t = Turtle::from_id(
        &registry,
        "canvas",
        ManualScheduler::new(),
        TurtleConfig::display_list(),
    )
    .unwrap();
    assert_eq!(t.renderer().size(), Size::new(64.0, 32.0));
    assert_eq!(t.renderer().frame_count(), 1);

    let err = Turtle::from_id(
        &registry,
        "nope",
        ManualScheduler::new(),
        TurtleConfig::display_list(),
    )
    .unwrap_err();
    assert_eq!(err, ConstructionError::NotFound { id: "nope".into() });

    let err = Turtle::make(
        SurfaceTarget::Id("caption"),
        &registry,
        ManualScheduler::new(),
        TurtleConfig::display_list(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConstructionError::WrongKind {
            id: "caption".into(),
            kind: "paragraph".into(),
        }
    );

    let direct = Turtle::make(
        SurfaceTarget::Surface(DisplayList::new(Size::new(8.0, 8.0))),
        &registry,
        ManualScheduler::new(),
        TurtleConfig::display_list(),
    )
    .unwrap();
    assert_eq!(direct.renderer().size(), Size::new(8.0, 8.0));
}

#[test]
fn initial_render_shows_background_and_glyph() {
    let (t, _) = turtle(Size::new(300.0, 120.0));
    let surface = t.renderer().surface();
    let ops = surface.ops();
    assert_eq!(
        ops[0],
        DrawOp::Fill {
            rect: Rect::new(0.0, 0.0, 300.0, 120.0),
            color: Rgba::WHITE,
        }
    );
    drop(surface);
    assert_eq!(glyph_center(&t), Some(Point::new(150.0, 60.0)));
}

#[test]
fn line_width_comes_from_config() {
    let scheduler = ManualScheduler::new();
    let mut t = Turtle::new(
        DisplayList::new(Size::new(10.0, 10.0)),
        scheduler,
        TurtleConfig::display_list().with_line_width(3.0),
    )
    .unwrap();
    t.forward(1.0);
    assert!(matches!(
        t.renderer().foreground().ops()[0],
        DrawOp::Stroke { width, .. } if width == 3.0
    ));
}

#[test]
fn config_controls_initial_visibility_and_units() {
    let scheduler = ManualScheduler::new();
    let t = Turtle::new(
        DisplayList::new(Size::new(10.0, 10.0)),
        scheduler,
        TurtleConfig::display_list()
            .with_visible(false)
            .with_radians_mode(true),
    )
    .unwrap();
    assert!(!t.is_visible());
    assert!(t.radians_mode());
    assert_eq!(glyph_center(&t), None);
}

/// A surface whose layers can never be allocated.
#[derive(Debug)]
struct NoLayers;

#[derive(Debug)]
struct Dot;

impl Glyph for Dot {
    fn size(&self) -> Size {
        Size::new(1.0, 1.0)
    }
}

impl DrawSurface for NoLayers {
    type Color = ();
    type Image = Dot;

    fn size(&self) -> Size {
        Size::new(1.0, 1.0)
    }

    fn create_layer(&self) -> Result<Self, ConstructionError> {
        Err(ConstructionError::LayerAllocation {
            reason: "out of layers".into(),
        })
    }

    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn transform(&mut self, _: Affine) {}
    fn fill_rect(&mut self, _: Rect, _: &()) {}
    fn clear_rect(&mut self, _: Rect) {}
    fn stroke_line(&mut self, _: Line, _: &(), _: f64) {}
    fn draw_layer(&mut self, _: &Self, _: Point) {}
    fn draw_image(&mut self, _: &Dot, _: Point) {}
}

#[test]
fn layer_allocation_failure_aborts_construction() {
    let scheduler = ManualScheduler::new();
    let err = Turtle::new(
        NoLayers,
        scheduler.clone(),
        TurtleConfig::new(Dot, (), ()),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConstructionError::LayerAllocation {
            reason: "out of layers".into()
        }
    );
    assert_eq!(scheduler.pending(), 0);
}

#[cfg(feature = "trace")]
#[test]
fn trace_reports_coalescing() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tortuga_core::trace::{RenderRequestEvent, TraceSink, Tracer};

    struct Requests(Rc<RefCell<Vec<bool>>>);
    impl TraceSink for Requests {
        fn on_render_request(&mut self, e: &RenderRequestEvent) {
            self.0.borrow_mut().push(e.coalesced);
        }
    }

    let (mut t, scheduler) = square();
    let log = Rc::new(RefCell::new(Vec::new()));
    t.renderer()
        .set_tracer(Tracer::new(Box::new(Requests(Rc::clone(&log)))));

    t.forward(1.0).forward(1.0).left(1.0);
    scheduler.tick();
    t.hide();
    assert_eq!(*log.borrow(), [false, true, true, false]);
}
