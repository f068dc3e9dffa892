// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The participant shared by every node of a context.
//!
//! No transport is attached: the participant only records the settings it
//! was created with. It exists to give the context lifecycle something to
//! create on the first node and destroy after the last one.

use crate::error::Result;
use crate::lifecycle::ResourceFactory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    domain_id: u32,
    instance_id: u64,
    enclave: String,
    localhost_only: bool,
}

impl Participant {
    #[must_use]
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    #[must_use]
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    #[must_use]
    pub fn enclave(&self) -> &str {
        &self.enclave
    }

    #[must_use]
    pub fn localhost_only(&self) -> bool {
        self.localhost_only
    }
}

/// Builds participants from the context settings.
#[derive(Debug, Clone)]
pub struct ParticipantFactory {
    pub(crate) domain_id: u32,
    pub(crate) instance_id: u64,
    pub(crate) enclave: String,
    pub(crate) localhost_only: bool,
}

impl ResourceFactory for ParticipantFactory {
    type Resource = Participant;

    fn create(&self) -> Result<Participant> {
        log::info!(
            "[rmw_stub] creating participant: domain_id={}, enclave='{}', localhost_only={}",
            self.domain_id,
            self.enclave,
            self.localhost_only
        );
        Ok(Participant {
            domain_id: self.domain_id,
            instance_id: self.instance_id,
            enclave: self.enclave.clone(),
            localhost_only: self.localhost_only,
        })
    }

    fn destroy(&self, participant: Participant) {
        log::info!(
            "[rmw_stub] destroying participant for domain {}",
            participant.domain_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_copies_settings() {
        let factory = ParticipantFactory {
            domain_id: 7,
            instance_id: 3,
            enclave: "/robot".into(),
            localhost_only: true,
        };
        let participant = factory.create().expect("participant");
        assert_eq!(participant.domain_id(), 7);
        assert_eq!(participant.instance_id(), 3);
        assert_eq!(participant.enclave(), "/robot");
        assert!(participant.localhost_only());
    }
}
