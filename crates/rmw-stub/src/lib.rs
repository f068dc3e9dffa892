// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stub ROS 2 middleware.
//!
//! Every rmw entity can be created and destroyed, but nothing is ever sent
//! or received. Two pieces carry real state:
//!
//! - [`EventLatch`]: the buffer behind guard conditions, "new data"
//!   notifications and QoS events. Triggers are delivered to a registered
//!   callback synchronously or buffered until one is registered, at which
//!   point the backlog can be replayed.
//! - [`SharedLifecycle`]: the reference count that creates the context's
//!   participant for the first node and destroys it after the last.
//!
//! The C boundary lives in [`ffi`].

pub mod env_config;
pub mod error;
pub mod event_latch;
pub mod ffi;
pub mod gid;
pub mod lifecycle;
pub mod qos;
pub mod rmw;
pub mod sequence;

pub use env_config::EnvConfig;
pub use error::{Error, Result, RetCode};
pub use event_latch::{EventHandler, EventLatch, Listener, ReplayMode, SourceToken};
pub use gid::{compare_gids_equal, EndpointKind, Gid, GID_STORAGE_SIZE};
pub use lifecycle::{LifecycleGuard, ResourceFactory, SharedLifecycle};
pub use qos::{check_compatible, QosCompatibility, QosProfile};
pub use rmw::context::{Context, InitOptions, DEFAULT_DOMAIN_ID};
pub use rmw::event::{Event, EventType};
pub use rmw::guard_condition::GuardCondition;
pub use rmw::node::Node;
pub use sequence::{EntitySequences, IdSequence};

/// Identifier stamped on every gid and handle issued by this middleware.
pub const IMPLEMENTATION_IDENTIFIER: &str = "rmw_stub_rs";

/// Serialization format advertised to the type support layer.
pub const SERIALIZATION_FORMAT: &str = "cdr";

#[must_use]
pub fn implementation_identifier() -> &'static str {
    IMPLEMENTATION_IDENTIFIER
}

#[must_use]
pub fn serialization_format() -> &'static str {
    SERIALIZATION_FORMAT
}

/// Optional middleware features (mirror of `rmw_feature_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    MessageInfoPublicationSequenceNumber,
    MessageInfoReceptionSequenceNumber,
    TypeDescriptionService,
}

/// No optional feature is supported.
#[must_use]
pub fn feature_supported(_feature: Feature) -> bool {
    false
}

/// Middleware log severities (mirror of `rmw_log_severity_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Severity is controlled through `RMW_STUB_LOG_LEVEL` / `RUST_LOG` instead.
pub fn set_log_severity(_severity: LogSeverity) -> Result<()> {
    Err(Error::Unsupported("rmw_set_log_severity"))
}
