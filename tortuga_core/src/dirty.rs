// Copyright 2026 the Tortuga Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Redraw coalescing.
//!
//! The compositor owns a single [`DirtyFlag`]. Every state change with a
//! visible effect asks for a render; only the first request after a render
//! actually schedules one. Later requests in the same tick are absorbed,
//! because the queued render reads the live state when it runs rather than a
//! snapshot taken at request time.
//!
//! # Transitions
//!
//! ```text
//!   Clean ──mark()──► Pending ──clear()──► Clean
//!                      │  ▲
//!                      └──┘ mark() is a no-op
//! ```

use core::cell::Cell;

/// The two states of the dirty flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirtyState {
    /// No render is outstanding.
    #[default]
    Clean,
    /// A render is queued and has not run yet.
    Pending,
}

/// Interior-mutable dirty flag shared between commands and the queued render.
#[derive(Debug, Default)]
pub struct DirtyFlag {
    state: Cell<DirtyState>,
}

impl DirtyFlag {
    /// Creates a clean flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Cell::new(DirtyState::Clean),
        }
    }

    /// Transitions `Clean → Pending`.
    ///
    /// Returns `true` if the caller must schedule a render, `false` if one is
    /// already pending.
    pub fn mark(&self) -> bool {
        match self.state.get() {
            DirtyState::Clean => {
                self.state.set(DirtyState::Pending);
                true
            }
            DirtyState::Pending => false,
        }
    }

    /// Returns to `Clean` after the queued render has run.
    pub fn clear(&self) {
        self.state.set(DirtyState::Clean);
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> DirtyState {
        self.state.get()
    }

    /// Returns `true` if a render is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.get() == DirtyState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clean() {
        let flag = DirtyFlag::new();
        assert_eq!(flag.state(), DirtyState::Clean);
        assert!(!flag.is_pending());
    }

    #[test]
    fn first_mark_schedules_later_marks_coalesce() {
        let flag = DirtyFlag::new();
        assert!(flag.mark(), "clean flag must request a schedule");
        assert!(!flag.mark(), "pending flag must absorb the request");
        assert!(!flag.mark(), "pending flag must absorb the request");
        assert!(flag.is_pending());
    }

    #[test]
    fn clear_rearms() {
        let flag = DirtyFlag::new();
        assert!(flag.mark(), "clean flag must request a schedule");
        flag.clear();
        assert_eq!(flag.state(), DirtyState::Clean);
        assert!(flag.mark(), "cleared flag must request a schedule again");
    }
}
