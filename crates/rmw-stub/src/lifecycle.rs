// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reference-counted lifecycle for a lazily created shared resource.
//!
//! The context owns one participant that every node depends on. The first
//! node to appear creates it, the last one to go away destroys it, and both
//! transitions happen under a single mutex so concurrent node creation and
//! teardown construct and destroy the resource exactly once.
//!
//! Dependents normally hold a [`LifecycleGuard`], which releases on drop
//! (including on the error paths of their own construction).

use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Creates and tears down the shared resource.
pub trait ResourceFactory: Send + Sync {
    type Resource: Send;

    /// Build the resource. Failure is reported to the acquiring caller as
    /// [`Error::BadAlloc`].
    fn create(&self) -> Result<Self::Resource>;

    /// Tear the resource down once the last dependent is gone.
    fn destroy(&self, resource: Self::Resource) {
        drop(resource);
    }
}

struct LifecycleState<R> {
    ref_count: usize,
    is_shut_down: bool,
    resource: Option<R>,
}

/// Mutex-guarded reference count plus shutdown flag.
pub struct SharedLifecycle<F: ResourceFactory> {
    factory: F,
    state: Mutex<LifecycleState<F::Resource>>,
}

impl<F: ResourceFactory> SharedLifecycle<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: Mutex::new(LifecycleState {
                ref_count: 0,
                is_shut_down: false,
                resource: None,
            }),
        }
    }

    /// Register a dependent, creating the resource if it is the first.
    pub fn acquire(&self) -> Result<()> {
        let mut state = self.state.lock();

        if state.is_shut_down {
            return Err(Error::InvalidState("context has been shutdown".into()));
        }

        if state.ref_count == 0 {
            let resource = self.factory.create().map_err(|err| match err {
                Error::BadAlloc(msg) => Error::BadAlloc(msg),
                other => Error::BadAlloc(other.to_string()),
            })?;
            state.resource = Some(resource);
            log::debug!("[rmw_stub] shared resource created");
        }

        state.ref_count += 1;
        Ok(())
    }

    /// Unregister a dependent, destroying the resource if it was the last.
    pub fn release(&self) -> Result<()> {
        let mut state = self.state.lock();

        if state.ref_count == 0 {
            return Err(Error::UnbalancedRelease);
        }

        state.ref_count -= 1;
        if state.ref_count == 0 {
            if let Some(resource) = state.resource.take() {
                self.factory.destroy(resource);
                log::debug!("[rmw_stub] shared resource destroyed");
            }
        }
        Ok(())
    }

    /// Refuse any further `acquire()`. Idempotent; existing dependents may
    /// still release.
    pub fn shutdown(&self) {
        self.state.lock().is_shut_down = true;
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.state.lock().is_shut_down
    }

    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.state.lock().ref_count
    }

    /// Run `f` against the live resource, if any.
    ///
    /// The lifecycle lock is held for the duration of `f`; do not call
    /// `acquire`/`release` from inside it.
    pub fn with_resource<T>(&self, f: impl FnOnce(&F::Resource) -> T) -> Option<T> {
        let state = self.state.lock();
        state.resource.as_ref().map(f)
    }

    /// Acquire and wrap the registration in a guard that releases on drop.
    pub fn acquire_guard(self: &Arc<Self>) -> Result<LifecycleGuard<F>> {
        self.acquire()?;
        Ok(LifecycleGuard {
            lifecycle: Arc::clone(self),
        })
    }
}

impl<F: ResourceFactory> Drop for SharedLifecycle<F> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.ref_count != 0 {
            log::error!(
                "[rmw_stub] {} dependent(s) still registered while finishing the context; \
                 ensure every node is destroyed before finishing the context to avoid leaking",
                state.ref_count
            );
        }
    }
}

impl<F: ResourceFactory> fmt::Debug for SharedLifecycle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SharedLifecycle")
            .field("ref_count", &state.ref_count)
            .field("is_shut_down", &state.is_shut_down)
            .field("resource_live", &state.resource.is_some())
            .finish()
    }
}

/// Scoped registration; releases the lifecycle when dropped.
pub struct LifecycleGuard<F: ResourceFactory> {
    lifecycle: Arc<SharedLifecycle<F>>,
}

impl<F: ResourceFactory> LifecycleGuard<F> {
    /// Lifecycle this guard is registered with.
    #[must_use]
    pub fn lifecycle(&self) -> &Arc<SharedLifecycle<F>> {
        &self.lifecycle
    }
}

impl<F: ResourceFactory> Drop for LifecycleGuard<F> {
    fn drop(&mut self) {
        if let Err(err) = self.lifecycle.release() {
            log::error!("[rmw_stub] lifecycle release failed: {}", err);
        }
    }
}

impl<F: ResourceFactory> fmt::Debug for LifecycleGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleGuard")
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
