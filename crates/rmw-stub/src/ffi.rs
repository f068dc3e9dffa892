// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! C boundary.
//!
//! Handles are boxed Rust objects passed around as opaque pointers. Event
//! callbacks follow `rmw_event_callback_t`: a C function receiving the
//! registered `user_data` and the number of events it is told about. A null
//! callback or null `user_data` unregisters.

use crate::env_config::EnvConfig;
use crate::error::RetCode;
use crate::event_latch::{EventHandler, Listener};
use crate::rmw::guard_condition::GuardCondition;
use crate::sequence::EntitySequences;
use std::os::raw::{c_char, c_void};
use std::sync::OnceLock;

/// NUL-terminated copies of the identifiers handed to C.
const IMPLEMENTATION_IDENTIFIER_C: &[u8] = b"rmw_stub_rs\0";
const SERIALIZATION_FORMAT_C: &[u8] = b"cdr\0";

/// Environment configuration, read and applied once per process
static ENV_CONFIG: OnceLock<EnvConfig> = OnceLock::new();

fn init_env_config() -> &'static EnvConfig {
    ENV_CONFIG.get_or_init(|| {
        let config = EnvConfig::from_env();
        config.apply_log_level();
        config
    })
}

/// One-line description of a non-default configuration.
fn env_config_summary(config: &EnvConfig) -> Option<String> {
    config.is_custom().then(|| {
        format!(
            "Environment config: domain_id={:?}, localhost_only={}, enclave='{}', log_level={}",
            config.domain_id, config.localhost_only, config.enclave, config.log_level
        )
    })
}

#[allow(non_camel_case_types)]
pub type rmw_event_callback_t = Option<unsafe extern "C" fn(user_data: *const c_void, count: usize)>;

/// C callback plus the user data it was registered with.
struct CCallback {
    callback: unsafe extern "C" fn(*const c_void, usize),
    user_data: *const c_void,
}

// SAFETY: the registrant guarantees `user_data` may be used from whichever
// thread triggers the latch, as rmw requires of executor callbacks.
unsafe impl Send for CCallback {}
unsafe impl Sync for CCallback {}

impl EventHandler<()> for CCallback {
    fn on_event(&self, _handle: &(), count: usize) {
        // SAFETY: validity of the pair is the registrant's contract.
        unsafe { (self.callback)(self.user_data, count) }
    }
}

fn listener_from_c(callback: rmw_event_callback_t, user_data: *const c_void) -> Option<Listener<()>> {
    match callback {
        Some(callback) if !user_data.is_null() => {
            Some(Listener::new(CCallback { callback, user_data }, ()))
        }
        _ => None,
    }
}

/// Opaque guard condition handle.
#[allow(non_camel_case_types)]
pub struct rmw_stub_guard_condition_t {
    inner: GuardCondition,
}

/// Returns the implementation identifier as a static C string.
#[no_mangle]
pub extern "C" fn rmw_stub_get_implementation_identifier() -> *const c_char {
    IMPLEMENTATION_IDENTIFIER_C.as_ptr().cast()
}

/// Returns the serialization format as a static C string.
#[no_mangle]
pub extern "C" fn rmw_stub_get_serialization_format() -> *const c_char {
    SERIALIZATION_FORMAT_C.as_ptr().cast()
}

/// Initialize console logging.
///
/// The filter comes from `RUST_LOG`, else `RMW_STUB_LOG_LEVEL` (default
/// "info"). A non-default environment configuration is logged once the
/// logger is installed.
///
/// # Returns
/// `RetCode::Ok` on success, `RetCode::Error` if a logger is already installed
#[no_mangle]
pub extern "C" fn rmw_stub_logging_init() -> RetCode {
    let config = init_env_config();

    match env_logger::Builder::from_env(env_logger::Env::default())
        .format_timestamp_millis()
        .try_init()
    {
        Ok(()) => {
            if let Some(summary) = env_config_summary(config) {
                log::info!("[rmw_stub] {}", summary);
            }
            RetCode::Ok
        }
        Err(_) => RetCode::Error, // Already initialized
    }
}

/// Creates a guard condition.
///
/// # Safety
///
/// - `out_guard` must be a valid, non-null pointer for writing the handle
#[no_mangle]
pub unsafe extern "C" fn rmw_stub_guard_condition_create(
    out_guard: *mut *mut rmw_stub_guard_condition_t,
) -> RetCode {
    if out_guard.is_null() {
        return RetCode::InvalidArgument;
    }

    let id = EntitySequences::global().guard_conditions.next_id();
    let boxed = Box::new(rmw_stub_guard_condition_t {
        inner: GuardCondition::new(id),
    });
    out_guard.write(Box::into_raw(boxed));
    RetCode::Ok
}

/// Destroys a guard condition created by `rmw_stub_guard_condition_create`.
///
/// # Safety
///
/// - `guard` must be null or a handle that has not been destroyed yet
/// - No other thread may use `guard` concurrently or afterwards
#[no_mangle]
pub unsafe extern "C" fn rmw_stub_guard_condition_destroy(
    guard: *mut rmw_stub_guard_condition_t,
) -> RetCode {
    if guard.is_null() {
        return RetCode::InvalidArgument;
    }
    drop(Box::from_raw(guard));
    RetCode::Ok
}

/// Triggers a guard condition.
///
/// # Safety
///
/// - `guard` must be a valid, non-null pointer to a live guard condition
#[no_mangle]
pub unsafe extern "C" fn rmw_stub_guard_condition_trigger(
    guard: *const rmw_stub_guard_condition_t,
) -> RetCode {
    let Some(guard) = guard.as_ref() else {
        return RetCode::InvalidArgument;
    };
    guard.inner.trigger();
    RetCode::Ok
}

/// Polls (and toggles) the triggered flag.
///
/// # Safety
///
/// - `guard` must be a valid, non-null pointer to a live guard condition
/// - `out_triggered` must be a valid, non-null pointer for writing
#[no_mangle]
pub unsafe extern "C" fn rmw_stub_guard_condition_has_triggered(
    guard: *const rmw_stub_guard_condition_t,
    out_triggered: *mut bool,
) -> RetCode {
    if out_triggered.is_null() {
        return RetCode::InvalidArgument;
    }
    let Some(guard) = guard.as_ref() else {
        return RetCode::InvalidArgument;
    };
    out_triggered.write(guard.inner.has_triggered());
    RetCode::Ok
}

/// Registers (or, with a null callback or null `user_data`, unregisters)
/// the executor callback. Triggers buffered so far are delivered to the new
/// callback before this returns.
///
/// # Safety
///
/// - `guard` must be a valid, non-null pointer to a live guard condition
/// - `callback` may run on any thread that triggers the guard, until it is
///   replaced or the guard is destroyed; `user_data` must stay valid for
///   that long
#[no_mangle]
pub unsafe extern "C" fn rmw_stub_guard_condition_set_callback(
    guard: *const rmw_stub_guard_condition_t,
    callback: rmw_event_callback_t,
    user_data: *const c_void,
) -> RetCode {
    let Some(guard) = guard.as_ref() else {
        return RetCode::InvalidArgument;
    };
    guard.inner.set_listener(listener_from_c(callback, user_data));
    RetCode::Ok
}
