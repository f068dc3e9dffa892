// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Middleware context.
//!
//! The context owns the participant lifecycle shared by its nodes. It goes
//! through three states: initialized, shut down (no new nodes, existing ones
//! may still be destroyed) and finished (`fini` consumes it).

use super::guard_condition::GuardCondition;
use super::node::Node;
use super::participant::ParticipantFactory;
use crate::env_config::EnvConfig;
use crate::error::{Error, Result};
use crate::lifecycle::SharedLifecycle;
use crate::sequence::EntitySequences;
use std::sync::Arc;

/// Sentinel asking for the default domain (`RMW_DEFAULT_DOMAIN_ID`).
pub const DEFAULT_DOMAIN_ID: usize = usize::MAX;

/// Options for [`Context::init`] (mirror of `rmw_init_options_t`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub instance_id: u64,
    pub domain_id: usize,
    pub enclave: Option<String>,
    pub localhost_only: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            instance_id: 0,
            domain_id: DEFAULT_DOMAIN_ID,
            enclave: None,
            localhost_only: false,
        }
    }
}

impl InitOptions {
    /// Options seeded from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&EnvConfig::from_env())
    }

    #[must_use]
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            instance_id: 0,
            domain_id: config
                .domain_id
                .map_or(DEFAULT_DOMAIN_ID, |id| id as usize),
            enclave: Some(config.enclave.clone()),
            localhost_only: config.localhost_only,
        }
    }

    #[must_use]
    pub fn instance_id(mut self, instance_id: u64) -> Self {
        self.instance_id = instance_id;
        self
    }

    #[must_use]
    pub fn domain_id(mut self, domain_id: usize) -> Self {
        self.domain_id = domain_id;
        self
    }

    #[must_use]
    pub fn enclave(mut self, enclave: impl Into<String>) -> Self {
        self.enclave = Some(enclave.into());
        self
    }

    #[must_use]
    pub fn localhost_only(mut self, localhost_only: bool) -> Self {
        self.localhost_only = localhost_only;
        self
    }
}

pub struct Context {
    instance_id: u64,
    actual_domain_id: u32,
    options: InitOptions,
    lifecycle: Arc<SharedLifecycle<ParticipantFactory>>,
    sequences: Arc<EntitySequences>,
}

impl Context {
    /// Initialize a context using the process-wide id sequences.
    pub fn init(options: InitOptions) -> Result<Self> {
        Self::init_with_sequences(options, EntitySequences::global())
    }

    /// Initialize a context drawing entity ids from `sequences`.
    pub fn init_with_sequences(
        options: InitOptions,
        sequences: Arc<EntitySequences>,
    ) -> Result<Self> {
        let enclave = options
            .enclave
            .clone()
            .ok_or_else(|| Error::InvalidArgument("expected enclave to be set".into()))?;

        let actual_domain_id = if options.domain_id == DEFAULT_DOMAIN_ID {
            0
        } else {
            u32::try_from(options.domain_id)
                .ok()
                .filter(|id| *id != u32::MAX)
                .ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "domain id {} out of range",
                        options.domain_id
                    ))
                })?
        };

        let factory = ParticipantFactory {
            domain_id: actual_domain_id,
            instance_id: options.instance_id,
            enclave,
            localhost_only: options.localhost_only,
        };

        log::info!(
            "[rmw_stub] context initialized: instance_id={}, domain_id={}",
            options.instance_id,
            actual_domain_id
        );

        Ok(Self {
            instance_id: options.instance_id,
            actual_domain_id,
            options,
            lifecycle: Arc::new(SharedLifecycle::new(factory)),
            sequences,
        })
    }

    #[must_use]
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    #[must_use]
    pub fn actual_domain_id(&self) -> u32 {
        self.actual_domain_id
    }

    #[must_use]
    pub fn options(&self) -> &InitOptions {
        &self.options
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.lifecycle.ref_count()
    }

    /// True while the participant exists (at least one node alive).
    #[must_use]
    pub fn has_participant(&self) -> bool {
        self.lifecycle.with_resource(|_| ()).is_some()
    }

    /// Refuse new nodes. Idempotent.
    pub fn shutdown(&self) {
        self.lifecycle.shutdown();
        log::debug!("[rmw_stub] context {} shut down", self.instance_id);
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.lifecycle.is_shut_down()
    }

    /// Finish the context. It must be shut down first; otherwise it is
    /// handed back with the error.
    pub fn fini(self) -> std::result::Result<(), (Context, Error)> {
        if !self.is_shut_down() {
            return Err((
                self,
                Error::InvalidArgument("context has not been shutdown".into()),
            ));
        }
        let live_nodes = self.node_count();
        if live_nodes != 0 {
            log::error!(
                "[rmw_stub] {} node(s) still alive while finishing the context; \
                 ensure every node is destroyed before finishing the context to avoid leaking",
                live_nodes
            );
        }
        log::debug!("[rmw_stub] context {} finished", self.instance_id);
        Ok(())
    }

    pub fn create_node(&self, name: &str, namespace: &str) -> Result<Node> {
        if self.is_shut_down() {
            return Err(Error::InvalidState("context has been shutdown".into()));
        }
        if name.is_empty() {
            return Err(Error::InvalidArgument("node name is empty".into()));
        }
        if !namespace.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "invalid node namespace '{}': must start with '/'",
                namespace
            )));
        }

        let participant = self.lifecycle.acquire_guard()?;
        Ok(Node::new(
            name,
            namespace,
            Arc::clone(&self.sequences),
            participant,
        ))
    }

    #[must_use]
    pub fn create_guard_condition(&self) -> GuardCondition {
        GuardCondition::new(self.sequences.guard_conditions.next_id())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("instance_id", &self.instance_id)
            .field("actual_domain_id", &self.actual_domain_id)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
