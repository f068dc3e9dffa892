// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Global identifiers for endpoints.
//!
//! A gid is the endpoint's sequence id copied (native byte order) into a
//! zero-filled 24-byte buffer, followed by one byte naming the endpoint
//! kind, and tagged with the implementation identifier that issued it.
//! Each kind has its own id sequence, so the kind byte keeps publisher 0
//! and subscription 0 apart.

use crate::error::{Error, Result};
use crate::IMPLEMENTATION_IDENTIFIER;

/// Size of the gid payload (`RMW_GID_STORAGE_SIZE`).
pub const GID_STORAGE_SIZE: usize = 24;

/// Offset of the endpoint kind byte in the payload.
const KIND_OFFSET: usize = 8;

/// Endpoint kind encoded into a gid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EndpointKind {
    Publisher = 1,
    Subscription = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid {
    implementation_identifier: &'static str,
    data: [u8; GID_STORAGE_SIZE],
}

impl Gid {
    /// Gid issued by this implementation for endpoint `id` of `kind`.
    #[must_use]
    pub fn for_endpoint(kind: EndpointKind, id: u64) -> Self {
        let mut data = [0u8; GID_STORAGE_SIZE];
        data[..KIND_OFFSET].copy_from_slice(&id.to_ne_bytes());
        data[KIND_OFFSET] = kind as u8;
        Self {
            implementation_identifier: IMPLEMENTATION_IDENTIFIER,
            data,
        }
    }

    /// Gid from raw parts (possibly issued by another implementation).
    #[must_use]
    pub const fn from_raw(
        implementation_identifier: &'static str,
        data: [u8; GID_STORAGE_SIZE],
    ) -> Self {
        Self {
            implementation_identifier,
            data,
        }
    }

    #[must_use]
    pub fn implementation_identifier(&self) -> &'static str {
        self.implementation_identifier
    }

    #[must_use]
    pub fn data(&self) -> &[u8; GID_STORAGE_SIZE] {
        &self.data
    }

    fn check_identifier(&self) -> Result<()> {
        if self.implementation_identifier == IMPLEMENTATION_IDENTIFIER {
            Ok(())
        } else {
            Err(Error::IncorrectImplementation {
                expected: IMPLEMENTATION_IDENTIFIER,
                actual: self.implementation_identifier.to_string(),
            })
        }
    }
}

/// Compare two gids byte-wise; both must come from this implementation.
pub fn compare_gids_equal(a: &Gid, b: &Gid) -> Result<bool> {
    a.check_identifier()?;
    b.check_identifier()?;
    Ok(a.data == b.data)
}
