// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS status events (deadline missed, liveliness changes, ...).
//!
//! Each event handle owns a per-event latch. Status payloads are never
//! produced by the stub, so [`Event::take`] is unsupported, but the
//! notification path is fully functional: whoever detects the status calls
//! [`Event::notify`] and the executor callback (or a later poll) sees it.

use crate::error::{Error, Result};
use crate::event_latch::{EventLatch, Listener, ReplayMode, SourceToken};

/// Status event kinds (mirror of `rmw_event_type_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    // Subscription side
    LivelinessChanged,
    RequestedDeadlineMissed,
    RequestedQosIncompatible,
    MessageLost,
    SubscriptionIncompatibleType,
    SubscriptionMatched,
    // Publisher side
    LivelinessLost,
    OfferedDeadlineMissed,
    OfferedQosIncompatible,
    PublisherIncompatibleType,
    PublicationMatched,
}

impl EventType {
    #[must_use]
    pub fn is_subscription_event(self) -> bool {
        matches!(
            self,
            Self::LivelinessChanged
                | Self::RequestedDeadlineMissed
                | Self::RequestedQosIncompatible
                | Self::MessageLost
                | Self::SubscriptionIncompatibleType
                | Self::SubscriptionMatched
        )
    }

    #[must_use]
    pub fn is_publisher_event(self) -> bool {
        !self.is_subscription_event()
    }
}

pub struct Event {
    kind: EventType,
    latch: EventLatch<SourceToken>,
}

impl Event {
    pub(crate) fn for_publisher(kind: EventType) -> Result<Self> {
        if !kind.is_publisher_event() {
            return Err(Error::InvalidArgument(format!(
                "{:?} is not a publisher event",
                kind
            )));
        }
        Ok(Self::new(kind))
    }

    pub(crate) fn for_subscription(kind: EventType) -> Result<Self> {
        if !kind.is_subscription_event() {
            return Err(Error::InvalidArgument(format!(
                "{:?} is not a subscription event",
                kind
            )));
        }
        Ok(Self::new(kind))
    }

    fn new(kind: EventType) -> Self {
        Self {
            kind,
            latch: EventLatch::new(ReplayMode::PerEvent),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// Install or clear the executor callback; buffered events are replayed.
    pub fn set_callback(&self, listener: Option<Listener<SourceToken>>) {
        self.latch.register(listener, true);
    }

    /// Producer hook: the status changed.
    pub fn notify(&self) {
        self.latch.trigger();
    }

    /// Toggle-on-read poll, see [`EventLatch::poll_and_reset`].
    pub fn has_triggered(&self) -> bool {
        self.latch.poll_and_reset()
    }

    pub fn take(&self) -> Result<()> {
        Err(Error::Unsupported("rmw_take_event"))
    }

    #[must_use]
    pub fn latch(&self) -> &EventLatch<SourceToken> {
        &self.latch
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("latch", &self.latch)
            .finish()
    }
}
