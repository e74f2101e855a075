/*
 * session.rs
 * Copyright (c) 2026 stampa developers
 */

//! Build-wide state.
//!
//! A [`BuildSession`] is created once per build invocation and owns the
//! only mutable state in the pipeline: the registry of helpers whose
//! registration has been emitted this build. Concurrent builds in the same
//! process must each own their own session; sharing one would let a prior
//! build's markers suppress initialization in the next.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-build context holding the helper-initialization registry.
#[derive(Debug, Default)]
pub struct BuildSession {
    initialized: Mutex<BTreeSet<String>>,
}

impl BuildSession {
    /// Create a fresh session with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a helper's registration as emitted for this build.
    ///
    /// Returns `true` the first time a helper is marked and `false` on
    /// every later call: writes are idempotent set-once operations.
    pub fn mark_initialized(&self, helper_id: &str) -> bool {
        self.registry().insert(helper_id.to_string())
    }

    /// Whether a helper's registration has been emitted this build.
    pub fn is_initialized(&self, helper_id: &str) -> bool {
        self.registry().contains(helper_id)
    }

    /// The helpers marked so far, sorted.
    pub fn initialized_helpers(&self) -> Vec<String> {
        self.registry().iter().cloned().collect()
    }

    fn registry(&self) -> MutexGuard<'_, BTreeSet<String>> {
        // Set-once writes keep a poisoned registry usable as-is.
        self.initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
