// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service servers.

use crate::error::{Error, Result};
use crate::event_latch::{EventLatch, Listener, ReplayMode, SourceToken};
use crate::qos::QosProfile;

/// Request header handed back with `send_response`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestId {
    pub writer_guid: [u8; 16],
    pub sequence_number: i64,
}

pub struct Service {
    id: u64,
    service_name: String,
    qos: QosProfile,
    new_request: EventLatch<SourceToken>,
}

impl Service {
    pub(crate) fn new(id: u64, service_name: &str, qos: QosProfile) -> Self {
        Self {
            id,
            service_name: service_name.to_string(),
            qos,
            new_request: EventLatch::new(ReplayMode::PerEvent),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn set_on_new_request_callback(&self, listener: Option<Listener<SourceToken>>) {
        self.new_request.register(listener, true);
    }

    /// Producer hook: a request arrived.
    pub fn notify_new_request(&self) {
        self.new_request.trigger();
    }

    pub fn has_new_request(&self) -> bool {
        self.new_request.poll_and_reset()
    }

    pub fn take_request<Req>(&self) -> Result<Option<(RequestId, Req)>> {
        Err(Error::Unsupported("rmw_take_request"))
    }

    pub fn send_response<Resp: ?Sized>(&self, _request_id: &RequestId, _response: &Resp) -> Result<()> {
        Err(Error::Unsupported("rmw_send_response"))
    }

    #[must_use]
    pub fn request_subscription_actual_qos(&self) -> QosProfile {
        QosProfile::services_default()
    }

    #[must_use]
    pub fn response_publisher_actual_qos(&self) -> QosProfile {
        QosProfile::services_default()
    }

    /// QoS requested at creation.
    #[must_use]
    pub fn requested_qos(&self) -> QosProfile {
        self.qos
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("id", &self.id)
            .field("service_name", &self.service_name)
            .field("new_request", &self.new_request)
            .finish()
    }
}
