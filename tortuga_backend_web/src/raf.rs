// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` render scheduling.
//!
//! [`RafScheduler`] maps each scheduled [`RenderTask`] onto one
//! `requestAnimationFrame` callback. The browser runs callbacks registered
//! before a frame in registration order, which is the ordering
//! [`RenderScheduler`] requires.

use alloc::rc::Rc;
use core::cell::Cell;

use tortuga_core::scheduler::{RenderScheduler, RenderTask};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global binding instead of `web_sys::Window::request_animation_frame`,
// which would need the Window object fetched (and unwrapped) per request.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;
}

/// Runs render tasks on the browser's next animation frame.
///
/// Clones share the same counters.
#[derive(Clone, Debug, Default)]
pub struct RafScheduler {
    counts: Rc<RafCounts>,
}

#[derive(Debug, Default)]
struct RafCounts {
    scheduled: Cell<u64>,
    ran: Cell<u64>,
}

impl RafScheduler {
    /// Creates a scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many tasks have been handed to `requestAnimationFrame`.
    #[must_use]
    pub fn scheduled(&self) -> u64 {
        self.counts.scheduled.get()
    }

    /// Returns how many scheduled tasks have not run yet.
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.counts.scheduled.get() - self.counts.ran.get()
    }
}

impl RenderScheduler for RafScheduler {
    fn schedule(&self, task: RenderTask) {
        let counts = Rc::clone(&self.counts);
        // `once_into_js` hands ownership of the closure to JS; it is freed
        // after its single invocation.
        let callback = Closure::once_into_js(move |_timestamp_ms: f64| {
            counts.ran.set(counts.ran.get() + 1);
            task();
        });
        request_animation_frame(&callback);
        self.counts.scheduled.set(self.counts.scheduled.get() + 1);
    }
}
