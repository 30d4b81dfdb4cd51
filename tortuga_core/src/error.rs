// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.
//!
//! Construction is the only fallible operation in the crate. Drawing and
//! rendering are infallible once a surface exists; numeric command arguments
//! are never validated (non-finite values simply propagate into state).

use alloc::string::String;

/// Raised synchronously when a turtle cannot be constructed.
///
/// A failed construction never leaves a partially built compositor behind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// The identifier did not resolve to anything.
    #[error("no element #{id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },
    /// The identifier resolved to something that is not a drawing surface.
    #[error("#{id} is a {kind}, not a drawing surface")]
    WrongKind {
        /// The identifier that was looked up.
        id: String,
        /// Human-readable kind of the object that was found instead.
        kind: String,
    },
    /// The surface exists but an offscreen layer could not be created for it.
    #[error("failed to allocate layer: {reason}")]
    LayerAllocation {
        /// Backend-specific description of the failure.
        reason: String,
    },
}
