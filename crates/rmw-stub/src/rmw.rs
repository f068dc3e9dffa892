// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity surface of the stub middleware.
//!
//! The context owns the participant lifecycle; nodes hold a registration on
//! it; endpoints, guard conditions and QoS events each own the latch that
//! signals their "new data" or status events. Transport, discovery and
//! serialization are not implemented and report [`Error::Unsupported`].

/// Context, init options and shutdown/fini sequencing.
pub mod context;
/// Service clients.
pub mod client;
/// QoS status events attached to publishers and subscriptions.
pub mod event;
/// Guard conditions (application-triggered latches).
pub mod guard_condition;
/// Nodes and endpoint creation.
pub mod node;
/// The shared participant and its factory.
pub mod participant;
/// Publishers.
pub mod publisher;
/// Service servers.
pub mod service;
/// Subscriptions.
pub mod subscription;

use crate::error::{Error, Result};
use crate::qos::QosProfile;

/// Reject names the stub cannot route. Full ROS name validation is left to
/// the client library.
pub(crate) fn validate_topic_name(topic_name: &str, qos: &QosProfile) -> Result<()> {
    if topic_name.is_empty() {
        return Err(Error::InvalidArgument(
            "topic_name argument is an empty string".into(),
        ));
    }
    if !qos.avoid_ros_namespace_conventions && !topic_name.starts_with('/') {
        return Err(Error::InvalidArgument(format!(
            "invalid topic name '{}': must be fully qualified",
            topic_name
        )));
    }
    Ok(())
}

pub(crate) fn validate_service_name(service_name: &str) -> Result<()> {
    if service_name.is_empty() {
        return Err(Error::InvalidArgument(
            "service_name argument is an empty string".into(),
        ));
    }
    Ok(())
}
