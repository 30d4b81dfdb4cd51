// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines export for tortuga diagnostics.
//!
//! This crate provides [`TraceSink`](tortuga_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: one JSON object per event, one event per line,
//!   for piping into `jq` or a log collector.

pub mod json;
pub mod pretty;
