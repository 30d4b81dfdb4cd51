// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving canvases by DOM id.

use alloc::string::ToString;

use tortuga_core::ConstructionError;
use tortuga_core::surface::SurfaceResolver;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlCanvasElement};

use crate::canvas::CanvasSurface;

/// Looks up `<canvas>` elements by id in a document.
#[derive(Clone, Debug)]
pub struct DocumentResolver {
    document: Document,
}

impl DocumentResolver {
    /// Creates a resolver over `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Creates a resolver over the current window's document.
    ///
    /// Returns `None` outside a browsing context (e.g. in a worker).
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// Returns the document searched by this resolver.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl SurfaceResolver for DocumentResolver {
    type Surface = CanvasSurface;

    fn resolve(&self, id: &str) -> Result<CanvasSurface, ConstructionError> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| ConstructionError::NotFound { id: id.to_string() })?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|other| ConstructionError::WrongKind {
                id: id.to_string(),
                kind: other.tag_name().to_lowercase(),
            })?;
        CanvasSurface::new(canvas)
    }
}
