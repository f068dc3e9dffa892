// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nodes.
//!
//! A node keeps the context's participant alive through a
//! [`LifecycleGuard`]: the first node created builds the participant and
//! dropping the last one tears it down. Endpoint ids come from the context's
//! [`EntitySequences`], so gids are unique per context (or per process when
//! the global sequences are used).

use super::client::Client;
use super::guard_condition::GuardCondition;
use super::participant::ParticipantFactory;
use super::publisher::{Publisher, PublisherOptions};
use super::service::Service;
use super::subscription::{Subscription, SubscriptionOptions};
use super::{validate_service_name, validate_topic_name};
use crate::error::Result;
use crate::lifecycle::LifecycleGuard;
use crate::qos::QosProfile;
use crate::sequence::EntitySequences;
use std::sync::Arc;

pub struct Node {
    name: String,
    namespace: String,
    graph_guard: GuardCondition,
    sequences: Arc<EntitySequences>,
    participant: LifecycleGuard<ParticipantFactory>,
}

impl Node {
    pub(crate) fn new(
        name: &str,
        namespace: &str,
        sequences: Arc<EntitySequences>,
        participant: LifecycleGuard<ParticipantFactory>,
    ) -> Self {
        let graph_guard = GuardCondition::new(sequences.guard_conditions.next_id());
        log::debug!("[rmw_stub] node '{}' created in '{}'", name, namespace);
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            graph_guard,
            sequences,
            participant,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully qualified node name (`/ns/name`).
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.ends_with('/') {
            format!("{}{}", self.namespace, self.name)
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }

    /// Guard condition signalling graph changes. No discovery runs, so only
    /// the application ever triggers it.
    #[must_use]
    pub fn graph_guard_condition(&self) -> &GuardCondition {
        &self.graph_guard
    }

    /// Domain of the participant this node is attached to.
    #[must_use]
    pub fn domain_id(&self) -> Option<u32> {
        self.participant
            .lifecycle()
            .with_resource(|participant| participant.domain_id())
    }

    pub fn create_publisher(
        &self,
        topic_name: &str,
        qos: &QosProfile,
        options: PublisherOptions,
    ) -> Result<Publisher> {
        validate_topic_name(topic_name, qos)?;
        let id = self.sequences.publishers.next_id();
        log::debug!("[rmw_stub] publisher {} on '{}'", id, topic_name);
        Ok(Publisher::new(id, topic_name, *qos, options))
    }

    pub fn create_subscription(
        &self,
        topic_name: &str,
        qos: &QosProfile,
        options: SubscriptionOptions,
    ) -> Result<Subscription> {
        validate_topic_name(topic_name, qos)?;
        let id = self.sequences.subscriptions.next_id();
        log::debug!("[rmw_stub] subscription {} on '{}'", id, topic_name);
        Ok(Subscription::new(id, topic_name, *qos, options))
    }

    pub fn create_service(&self, service_name: &str, qos: &QosProfile) -> Result<Service> {
        validate_service_name(service_name)?;
        let id = self.sequences.services.next_id();
        log::debug!("[rmw_stub] service {} on '{}'", id, service_name);
        Ok(Service::new(id, service_name, *qos))
    }

    pub fn create_client(&self, service_name: &str, qos: &QosProfile) -> Result<Client> {
        validate_service_name(service_name)?;
        let id = self.sequences.clients.next_id();
        log::debug!("[rmw_stub] client {} on '{}'", id, service_name);
        Ok(Client::new(id, service_name, *qos))
    }

    /// No server is ever discovered.
    #[must_use]
    pub fn service_server_is_available(&self, _client: &Client) -> bool {
        false
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        log::debug!("[rmw_stub] node '{}' destroyed", self.fully_qualified_name());
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("graph_guard", &self.graph_guard)
            .finish()
    }
}

#[cfg(test)]
mod tests;
