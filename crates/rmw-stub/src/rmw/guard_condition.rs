// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Guard conditions: latches triggered explicitly by the application.
//!
//! A waitset polls [`GuardCondition::has_triggered`]; an events executor
//! installs a callback instead and receives the triggers buffered so far in
//! one call carrying their count.

use crate::event_latch::{EventLatch, Listener, ReplayMode};

pub struct GuardCondition {
    id: u64,
    latch: EventLatch<()>,
}

impl GuardCondition {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            latch: EventLatch::new(ReplayMode::Coalesced),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn trigger(&self) {
        self.latch.trigger();
    }

    /// Toggle-on-read poll, see [`EventLatch::poll_and_reset`].
    pub fn has_triggered(&self) -> bool {
        self.latch.poll_and_reset()
    }

    /// Install `callback`, handing it the buffered trigger count first.
    pub fn set_callback(&self, callback: impl Fn(usize) + Send + Sync + 'static) {
        let listener = Listener::new(move |_: &(), count: usize| callback(count), ());
        self.latch.register(Some(listener), true);
    }

    pub fn clear_callback(&self) {
        self.latch.register(None, true);
    }

    /// Install or clear a prebuilt listener (used by the C boundary).
    pub fn set_listener(&self, listener: Option<Listener<()>>) {
        self.latch.register(listener, true);
    }

    #[must_use]
    pub fn latch(&self) -> &EventLatch<()> {
        &self.latch
    }
}

impl std::fmt::Debug for GuardCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardCondition")
            .field("id", &self.id)
            .field("latch", &self.latch)
            .finish()
    }
}
