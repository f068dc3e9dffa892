// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service clients.

use super::service::RequestId;
use crate::error::{Error, Result};
use crate::event_latch::{EventLatch, Listener, ReplayMode, SourceToken};
use crate::qos::QosProfile;

pub struct Client {
    id: u64,
    service_name: String,
    qos: QosProfile,
    new_response: EventLatch<SourceToken>,
}

impl Client {
    pub(crate) fn new(id: u64, service_name: &str, qos: QosProfile) -> Self {
        Self {
            id,
            service_name: service_name.to_string(),
            qos,
            new_response: EventLatch::new(ReplayMode::PerEvent),
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

    pub fn set_on_new_response_callback(&self, listener: Option<Listener<SourceToken>>) {
        self.new_response.register(listener, true);
    }

    /// Producer hook: a response arrived.
    pub fn notify_new_response(&self) {
        self.new_response.trigger();
    }

    pub fn has_new_response(&self) -> bool {
        self.new_response.poll_and_reset()
    }

    pub fn send_request<Req: ?Sized>(&self, _request: &Req) -> Result<i64> {
        Err(Error::Unsupported("rmw_send_request"))
    }

    pub fn take_response<Resp>(&self) -> Result<Option<(RequestId, Resp)>> {
        Err(Error::Unsupported("rmw_take_response"))
    }

    #[must_use]
    pub fn request_publisher_actual_qos(&self) -> QosProfile {
        QosProfile::services_default()
    }

    #[must_use]
    pub fn response_subscription_actual_qos(&self) -> QosProfile {
        QosProfile::services_default()
    }

    #[must_use]
    pub fn requested_qos(&self) -> QosProfile {
        self.qos
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("service_name", &self.service_name)
            .field("new_response", &self.new_response)
            .finish()
    }
}
