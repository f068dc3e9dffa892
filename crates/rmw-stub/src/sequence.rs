// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Monotonic identity sequences for entity kinds.
//!
//! Every entity kind (publisher, subscription, ...) draws its identity from
//! its own [`IdSequence`]. The sequences are grouped in [`EntitySequences`];
//! contexts use the lazily created process-wide instance unless one is
//! injected, which lets tests start from a known state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Atomic increment-and-fetch id generator.
#[derive(Debug)]
pub struct IdSequence {
    start: u64,
    next: AtomicU64,
}

impl IdSequence {
    /// Create a sequence whose first id is `start`.
    #[must_use]
    pub const fn starting_at(start: u64) -> Self {
        Self {
            start,
            next: AtomicU64::new(start),
        }
    }

    /// Hand out the next id.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Id the next call to [`next_id`](Self::next_id) will return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Rewind to the starting id.
    pub fn reset(&self) {
        self.next.store(self.start, Ordering::Relaxed);
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

/// One sequence per entity kind.
#[derive(Debug, Default)]
pub struct EntitySequences {
    pub publishers: IdSequence,
    pub subscriptions: IdSequence,
    pub services: IdSequence,
    pub clients: IdSequence,
    pub guard_conditions: IdSequence,
}

static GLOBAL_SEQUENCES: OnceLock<Arc<EntitySequences>> = OnceLock::new();

impl EntitySequences {
    /// Fresh set of sequences, all starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide sequences shared by contexts created without injection.
    pub fn global() -> Arc<EntitySequences> {
        Arc::clone(GLOBAL_SEQUENCES.get_or_init(|| Arc::new(EntitySequences::new())))
    }

    /// Rewind every sequence.
    pub fn reset(&self) {
        self.publishers.reset();
        self.subscriptions.reset();
        self.services.reset();
        self.clients.reset();
        self.guard_conditions.reset();
    }
}
