// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for the stub middleware and its C return codes.

use thiserror::Error;

/// Errors emitted by the stub middleware.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller supplied a malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Handle was issued by another middleware implementation.
    #[error("incorrect rmw implementation: expected '{expected}', got '{actual}'")]
    IncorrectImplementation {
        expected: &'static str,
        actual: String,
    },
    /// Shared resource construction failed.
    #[error("allocation failed: {0}")]
    BadAlloc(String),
    /// Operation not allowed in the current state (e.g. after shutdown).
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// `release()` called more often than `acquire()`.
    #[error("unbalanced release: reference count is already zero")]
    UnbalancedRelease,
    /// Operation exists in the API surface but is not implemented.
    #[error("{0} not implemented")]
    Unsupported(&'static str),
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// C return codes (numeric values follow `rmw_ret_t`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    /// Operation completed successfully
    Ok = 0,
    /// Generic failure
    Error = 1,
    /// Timed out
    Timeout = 2,
    /// Not implemented by this middleware
    Unsupported = 3,
    /// Allocation failed
    BadAlloc = 10,
    /// Invalid argument (null pointer, malformed value)
    InvalidArgument = 11,
    /// Handle belongs to another implementation
    IncorrectRmwImplementation = 12,
}

impl Error {
    /// Map onto the C return code reported across the FFI boundary.
    #[must_use]
    pub fn ret_code(&self) -> RetCode {
        match self {
            Self::InvalidArgument(_) => RetCode::InvalidArgument,
            Self::IncorrectImplementation { .. } => RetCode::IncorrectRmwImplementation,
            Self::BadAlloc(_) => RetCode::BadAlloc,
            Self::Unsupported(_) => RetCode::Unsupported,
            // rmw has no dedicated code for these
            Self::InvalidState(_) | Self::UnbalancedRelease => RetCode::Error,
        }
    }
}

impl From<Result<()>> for RetCode {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => RetCode::Ok,
            Err(err) => err.ret_code(),
        }
    }
}
