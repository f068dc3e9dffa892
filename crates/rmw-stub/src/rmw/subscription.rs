// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subscriptions.
//!
//! Messages are never received, but the "new message" latch is live: a
//! producer calling [`Subscription::notify_new_message`] reaches the
//! executor callback, or is buffered until one is installed.

use super::event::{Event, EventType};
use crate::error::{Error, Result};
use crate::event_latch::{EventLatch, Listener, ReplayMode, SourceToken};
use crate::gid::{EndpointKind, Gid};
use crate::qos::QosProfile;

/// Per-subscription options (mirror of `rmw_subscription_options_t`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionOptions {
    pub ignore_local_publications: bool,
    /// Content filter expression; stored, never evaluated.
    pub content_filter: Option<String>,
}

pub struct Subscription {
    id: u64,
    gid: Gid,
    topic_name: String,
    qos: QosProfile,
    options: SubscriptionOptions,
    new_message: EventLatch<SourceToken>,
}

impl Subscription {
    pub(crate) fn new(
        id: u64,
        topic_name: &str,
        qos: QosProfile,
        options: SubscriptionOptions,
    ) -> Self {
        Self {
            id,
            gid: Gid::for_endpoint(EndpointKind::Subscription, id),
            topic_name: topic_name.to_string(),
            qos,
            options,
            new_message: EventLatch::new(ReplayMode::PerEvent),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn gid(&self) -> &Gid {
        &self.gid
    }

    #[must_use]
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    #[must_use]
    pub fn options(&self) -> &SubscriptionOptions {
        &self.options
    }

    #[must_use]
    pub fn actual_qos(&self) -> QosProfile {
        self.qos
    }

    /// Install or clear the executor callback; buffered messages are
    /// replayed one call each.
    pub fn set_on_new_message_callback(&self, listener: Option<Listener<SourceToken>>) {
        self.new_message.register(listener, true);
    }

    /// Producer hook: a message arrived.
    pub fn notify_new_message(&self) {
        self.new_message.trigger();
    }

    /// Toggle-on-read poll used by waitsets.
    pub fn has_new_message(&self) -> bool {
        self.new_message.poll_and_reset()
    }

    pub fn take<M>(&self) -> Result<Option<M>> {
        Err(Error::Unsupported("rmw_take"))
    }

    pub fn count_matched_publishers(&self) -> Result<usize> {
        Err(Error::Unsupported("rmw_subscription_count_matched_publishers"))
    }

    /// Status event handle; `kind` must be a subscription-side event.
    pub fn create_event(&self, kind: EventType) -> Result<Event> {
        Event::for_subscription(kind)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic_name", &self.topic_name)
            .field("new_message", &self.new_message)
            .finish()
    }
}
