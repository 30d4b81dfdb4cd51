// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drawing session that exercises the tracing pipeline.
//!
//! Draws a few figures onto a [`DisplayList`] with a step-driven scheduler,
//! printing every trace event with a
//! [`PrettyPrintSink`](tortuga_debug::pretty::PrettyPrintSink) and writing
//! the same events as JSON lines to the path given as the first argument
//! (default `turtle-trace.jsonl`).

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use anyhow::Context as _;
use kurbo::Size;
use tortuga_core::display_list::{DisplayList, Rgba};
use tortuga_core::scheduler::ManualScheduler;
use tortuga_core::trace::{
    ClearEvent, RenderEvent, RenderRequestEvent, StrokeEvent, TraceSink, Tracer,
};
use tortuga_core::{Turtle, TurtleConfig};

use tortuga_debug::json::JsonLinesSink;
use tortuga_debug::pretty::PrettyPrintSink;

const SURFACE_SIZE: f64 = 400.0;
const DEFAULT_OUTPUT: &str = "turtle-trace.jsonl";

/// Forwards every event to two sinks.
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_stroke(&mut self, e: &StrokeEvent) {
        self.0.on_stroke(e);
        self.1.on_stroke(e);
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        self.0.on_clear(e);
        self.1.on_clear(e);
    }

    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        self.0.on_render_request(e);
        self.1.on_render_request(e);
    }

    fn on_render(&mut self, e: &RenderEvent) {
        self.0.on_render(e);
        self.1.on_render(e);
    }
}

/// A sink shared between the tracer and `main`, so `main` can finish it.
struct Shared<T>(Rc<RefCell<T>>);

impl<T: TraceSink> TraceSink for Shared<T> {
    fn on_stroke(&mut self, e: &StrokeEvent) {
        self.0.borrow_mut().on_stroke(e);
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        self.0.borrow_mut().on_clear(e);
    }

    fn on_render_request(&mut self, e: &RenderRequestEvent) {
        self.0.borrow_mut().on_render_request(e);
    }

    fn on_render(&mut self, e: &RenderEvent) {
        self.0.borrow_mut().on_render(e);
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let file = File::create(&path).with_context(|| format!("creating {path}"))?;

    // -- turtle ------------------------------------------------------------
    let scheduler = ManualScheduler::new();
    let mut turtle = Turtle::new(
        DisplayList::new(Size::new(SURFACE_SIZE, SURFACE_SIZE)),
        scheduler.clone(),
        TurtleConfig::display_list(),
    )
    .context("constructing turtle")?;

    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let json = Rc::new(RefCell::new(JsonLinesSink::with_writer(BufWriter::new(file))));
    turtle
        .renderer()
        .set_tracer(Tracer::new(Box::new(Tee(pretty, Shared(Rc::clone(&json))))));

    // -- square ------------------------------------------------------------
    turtle.repeat(4, |t| {
        t.forward(100.0).left(90.0);
    });
    scheduler.tick();

    // -- star, offset and in red -------------------------------------------
    turtle
        .pen_up()
        .move_to(-150.0, 120.0)
        .pen_down()
        .color(Rgba::from_rgb8(200, 30, 30));
    turtle.repeat(5, |t| {
        t.forward(80.0).right(144.0);
    });
    scheduler.tick();

    // -- clear and spiral on a dark background -----------------------------
    turtle
        .clear()
        .home()
        .background(Rgba::from_rgb8(20, 20, 40))
        .color(Rgba::WHITE);
    let mut step = 2.0;
    turtle.repeat(36, |t| {
        t.forward(step).left(20.0);
        step += 2.0;
    });
    turtle.hide();
    scheduler.tick();

    let strokes = turtle.renderer().foreground().strokes().count();
    println!(
        "frames={} ticks={} strokes={strokes} final=({:.2}, {:.2}) heading={:.1}°",
        turtle.renderer().frame_count(),
        scheduler.ticks(),
        turtle.x(),
        turtle.y(),
        turtle.orientation(),
    );

    // Release the tracer's handle so the JSON sink can be finished.
    turtle.renderer().set_tracer(Tracer::none());
    let json = Rc::try_unwrap(json)
        .map_err(|_| anyhow::anyhow!("JSON sink still shared"))?
        .into_inner();
    json.finish().with_context(|| format!("writing {path}"))?;
    println!("JSON trace written to {path}");
    Ok(())
}
