// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Event latch bridging push-based producers and poll-or-callback consumers.
//!
//! A latch records triggers fired by a producer (any thread, any time) and
//! hands them to whichever consumer is present:
//!
//! - **Unattended** (no listener): triggers are buffered; a consumer polls
//!   with [`EventLatch::poll_and_reset`].
//! - **Attended** (listener registered): every trigger invokes the handler
//!   inline, in the producer's thread.
//!
//! Registering a listener always drains the backlog, either replaying it to
//! the new handler or dropping it. Registration and delivery share one lock,
//! so a trigger racing a registration is either part of the replay or
//! delivered live, never both and never neither.
//!
//! # Handler contract
//!
//! Handlers run while the latch lock is held. They must return promptly and
//! must not call back into the same latch (the lock is not reentrant).
//!
//! # Example
//!
//! ```ignore
//! let latch = EventLatch::new(ReplayMode::Coalesced);
//! latch.trigger();
//! latch.trigger();
//!
//! // Picks up the two buffered triggers in a single call (count = 2).
//! latch.register(Some(Listener::new(|_: &(), count| println!("{count}"), ())), true);
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Consumer callback invoked by a latch.
///
/// `handle` is the source token supplied at registration; `count` is the
/// number of events carried by this delivery.
pub trait EventHandler<H>: Send + Sync {
    fn on_event(&self, handle: &H, count: usize);
}

impl<H, F> EventHandler<H> for F
where
    F: Fn(&H, usize) + Send + Sync,
{
    fn on_event(&self, handle: &H, count: usize) {
        self(handle, count);
    }
}

/// How a buffered backlog is handed to a newly registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// One invocation carrying the whole backlog count (guard conditions).
    Coalesced,
    /// One invocation per buffered trigger, each with count 1 (entity events).
    PerEvent,
}

/// Opaque token identifying an event source to a multiplexing consumer.
///
/// At the C boundary this carries the address of the rmw handle the
/// callback was registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceToken(usize);

impl SourceToken {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(&self) -> usize {
        self.0
    }
}

/// A registered consumer: handler plus the token echoed on every delivery.
pub struct Listener<H> {
    handler: Arc<dyn EventHandler<H>>,
    handle: H,
}

impl<H> Listener<H> {
    /// Build a listener from any handler.
    pub fn new(handler: impl EventHandler<H> + 'static, handle: H) -> Self {
        Self {
            handler: Arc::new(handler),
            handle,
        }
    }

    /// Build a listener sharing an existing handler.
    pub fn from_shared(handler: Arc<dyn EventHandler<H>>, handle: H) -> Self {
        Self { handler, handle }
    }

    /// Token echoed to the handler.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[inline]
    fn deliver(&self, count: usize) {
        self.handler.on_event(&self.handle, count);
    }
}

impl<H: fmt::Debug> fmt::Debug for Listener<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

struct LatchState<H> {
    /// Triggers buffered since the last consumption
    pending: u64,
    /// "Has unread event" flag observed by polls
    has_triggered: bool,
    listener: Option<Listener<H>>,
}

/// Per-entity trigger latch, generic over the source token type.
pub struct EventLatch<H = ()> {
    replay_mode: ReplayMode,
    state: Mutex<LatchState<H>>,
}

impl<H> EventLatch<H> {
    /// Create an unattended latch.
    #[must_use]
    pub fn new(replay_mode: ReplayMode) -> Self {
        Self {
            replay_mode,
            state: Mutex::new(LatchState {
                pending: 0,
                has_triggered: false,
                listener: None,
            }),
        }
    }

    /// Record that an event occurred.
    ///
    /// Delivers to the registered handler (count 1) or buffers the event.
    /// Never fails.
    pub fn trigger(&self) {
        let mut state = self.state.lock();
        if let Some(listener) = state.listener.as_ref() {
            listener.deliver(1);
        } else {
            state.pending += 1;
            state.has_triggered = true;
        }
    }

    /// Return the "has triggered" flag and flip it.
    ///
    /// This is a toggle, not a plain read: with no trigger in between, two
    /// consecutive polls return opposite values. The buffered backlog is
    /// consumed either way.
    pub fn poll_and_reset(&self) -> bool {
        let mut state = self.state.lock();
        let triggered = state.has_triggered;
        state.has_triggered = !triggered;
        state.pending = 0;
        triggered
    }

    /// Install (`Some`) or clear (`None`) the consumer.
    ///
    /// Installing always drains the backlog: with `replay_previous` the new
    /// handler receives it before the registration becomes visible to
    /// producers, otherwise it is dropped.
    pub fn register(&self, listener: Option<Listener<H>>, replay_previous: bool) {
        let mut state = self.state.lock();

        let Some(listener) = listener else {
            if state.listener.take().is_some() {
                log::trace!("[rmw_stub] latch listener cleared");
            }
            return;
        };

        let backlog = std::mem::take(&mut state.pending);
        state.has_triggered = false;

        if backlog > 0 {
            if replay_previous {
                self.replay(&listener, backlog);
            } else {
                log::debug!(
                    "[rmw_stub] dropping {} buffered trigger(s) on listener registration",
                    backlog
                );
            }
        }

        state.listener = Some(listener);
    }

    fn replay(&self, listener: &Listener<H>, backlog: u64) {
        match self.replay_mode {
            ReplayMode::Coalesced => {
                listener.deliver(usize::try_from(backlog).unwrap_or(usize::MAX));
            }
            ReplayMode::PerEvent => {
                for _ in 0..backlog {
                    listener.deliver(1);
                }
            }
        }
    }

    /// Triggers currently buffered.
    #[must_use]
    pub fn pending_count(&self) -> u64 {
        self.state.lock().pending
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn is_attended(&self) -> bool {
        self.state.lock().listener.is_some()
    }

    #[must_use]
    pub fn replay_mode(&self) -> ReplayMode {
        self.replay_mode
    }
}

impl<H> fmt::Debug for EventLatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EventLatch")
            .field("replay_mode", &self.replay_mode)
            .field("pending", &state.pending)
            .field("has_triggered", &state.has_triggered)
            .field("attended", &state.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
