// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Publishers. Nothing leaves the process: `publish` only logs.

use super::event::{Event, EventType};
use crate::error::{Error, Result};
use crate::gid::{EndpointKind, Gid};
use crate::qos::QosProfile;

/// Per-publisher options (mirror of `rmw_publisher_options_t`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherOptions {
    /// Stored as given; no network flows exist to make unique.
    pub require_unique_network_flow_endpoints: bool,
}

#[derive(Debug)]
pub struct Publisher {
    id: u64,
    gid: Gid,
    topic_name: String,
    qos: QosProfile,
    options: PublisherOptions,
}

impl Publisher {
    pub(crate) fn new(id: u64, topic_name: &str, qos: QosProfile, options: PublisherOptions) -> Self {
        Self {
            id,
            gid: Gid::for_endpoint(EndpointKind::Publisher, id),
            topic_name: topic_name.to_string(),
            qos,
            options,
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
    pub fn options(&self) -> &PublisherOptions {
        &self.options
    }

    /// QoS as requested; no negotiation takes place.
    #[must_use]
    pub fn actual_qos(&self) -> QosProfile {
        self.qos
    }

    /// Accept a message and drop it.
    pub fn publish<M: ?Sized>(&self, _message: &M) -> Result<()> {
        log::debug!("[rmw_stub] publish on '{}' (dropped)", self.topic_name);
        Ok(())
    }

    pub fn publish_serialized(&self, _payload: &[u8]) -> Result<()> {
        Err(Error::Unsupported("rmw_publish_serialized_message"))
    }

    /// No subscriptions are ever discovered.
    pub fn count_matched_subscriptions(&self) -> Result<usize> {
        Ok(0)
    }

    pub fn assert_liveliness(&self) -> Result<()> {
        Err(Error::Unsupported("rmw_publisher_assert_liveliness"))
    }

    /// Status event handle; `kind` must be a publisher-side event.
    pub fn create_event(&self, kind: EventType) -> Result<Event> {
        Event::for_publisher(kind)
    }
}
