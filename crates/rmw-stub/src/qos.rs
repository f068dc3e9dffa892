// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS profile data carried by endpoints.
//!
//! The stub does not negotiate QoS: profiles are stored as given and echoed
//! back by the `actual_qos` accessors, and every pair of profiles is
//! reported compatible.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum History {
    #[default]
    SystemDefault,
    KeepLast,
    KeepAll,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reliability {
    #[default]
    SystemDefault,
    Reliable,
    BestEffort,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    #[default]
    SystemDefault,
    TransientLocal,
    Volatile,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Liveliness {
    #[default]
    SystemDefault,
    Automatic,
    ManualByTopic,
    Unknown,
}

/// Endpoint QoS profile (mirror of `rmw_qos_profile_t`).
///
/// Zero durations mean "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosProfile {
    pub history: History,
    pub depth: usize,
    pub reliability: Reliability,
    pub durability: Durability,
    pub deadline: Duration,
    pub lifespan: Duration,
    pub liveliness: Liveliness,
    pub liveliness_lease_duration: Duration,
    /// Skip ROS topic-name conventions (no `/` prefix required).
    pub avoid_ros_namespace_conventions: bool,
}

impl Default for QosProfile {
    /// `rmw_qos_profile_default`: keep last 10, reliable, volatile.
    fn default() -> Self {
        Self {
            history: History::KeepLast,
            depth: 10,
            reliability: Reliability::Reliable,
            durability: Durability::Volatile,
            deadline: Duration::ZERO,
            lifespan: Duration::ZERO,
            liveliness: Liveliness::SystemDefault,
            liveliness_lease_duration: Duration::ZERO,
            avoid_ros_namespace_conventions: false,
        }
    }
}

impl QosProfile {
    /// `rmw_qos_profile_services_default`.
    #[must_use]
    pub fn services_default() -> Self {
        Self::default()
    }

    /// `rmw_qos_profile_sensor_data`: keep last 5, best effort.
    #[must_use]
    pub fn sensor_data() -> Self {
        Self {
            depth: 5,
            reliability: Reliability::BestEffort,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn keep_last(mut self, depth: usize) -> Self {
        self.history = History::KeepLast;
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn reliability(mut self, reliability: Reliability) -> Self {
        self.reliability = reliability;
        self
    }

    #[must_use]
    pub fn durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    #[must_use]
    pub fn avoid_ros_namespace_conventions(mut self, avoid: bool) -> Self {
        self.avoid_ros_namespace_conventions = avoid;
        self
    }
}

/// Outcome of a QoS compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QosCompatibility {
    Ok,
    Warning,
    Error,
}

/// Check whether a publisher and subscription profile can match.
///
/// Always [`QosCompatibility::Ok`]: the stub never refuses a match.
#[must_use]
pub fn check_compatible(_publisher: &QosProfile, _subscription: &QosProfile) -> QosCompatibility {
    QosCompatibility::Ok
}
