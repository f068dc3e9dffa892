// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Environment variable configuration for rmw_stub.
//!
//! - `RMW_STUB_DOMAIN_ID`: domain ID (default: 0, or `ROS_DOMAIN_ID` if set)
//! - `RMW_STUB_LOG_LEVEL`: logging level (default: "info")
//! - `ROS_DOMAIN_ID`: fallback for `RMW_STUB_DOMAIN_ID`
//! - `ROS_LOCALHOST_ONLY`: "1" restricts the participant to localhost
//! - `ROS_SECURITY_ENCLAVE`: enclave name (default: "/")
//!
//! # Example
//!
//! ```bash
//! export RMW_STUB_DOMAIN_ID=42
//! export RMW_STUB_LOG_LEVEL=debug
//! ```

use std::env;

pub const ENV_DOMAIN_ID: &str = "RMW_STUB_DOMAIN_ID";
pub const ENV_LOG_LEVEL: &str = "RMW_STUB_LOG_LEVEL";

/// ROS 2 environment variable for domain ID (fallback)
pub const ENV_ROS_DOMAIN_ID: &str = "ROS_DOMAIN_ID";
pub const ENV_ROS_LOCALHOST_ONLY: &str = "ROS_LOCALHOST_ONLY";
pub const ENV_ROS_SECURITY_ENCLAVE: &str = "ROS_SECURITY_ENCLAVE";

/// Enclave used when none is configured.
pub const DEFAULT_ENCLAVE: &str = "/";

/// Runtime configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Domain ID, if one was configured
    pub domain_id: Option<u32>,

    /// Restrict traffic to localhost
    pub localhost_only: bool,

    /// Security enclave
    pub enclave: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            domain_id: None,
            localhost_only: false,
            enclave: DEFAULT_ENCLAVE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EnvConfig {
    /// Load configuration from environment variables
    ///
    /// Priority for domain ID:
    /// 1. RMW_STUB_DOMAIN_ID
    /// 2. ROS_DOMAIN_ID
    /// 3. unset (context falls back to domain 0)
    #[must_use]
    pub fn from_env() -> Self {
        let domain_id = env::var(ENV_DOMAIN_ID)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .or_else(|| {
                env::var(ENV_ROS_DOMAIN_ID)
                    .ok()
                    .and_then(|s| s.trim().parse::<u32>().ok())
            });

        let localhost_only = env::var(ENV_ROS_LOCALHOST_ONLY)
            .ok()
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let enclave = env::var(ENV_ROS_SECURITY_ENCLAVE)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENCLAVE.to_string());

        let log_level = env::var(ENV_LOG_LEVEL)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Self {
            domain_id,
            localhost_only,
            enclave,
            log_level,
        }
    }

    /// Check if any custom configuration was provided
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.domain_id.is_some()
            || self.localhost_only
            || self.enclave != DEFAULT_ENCLAVE
            || self.log_level != "info"
    }

    /// Seed `RUST_LOG` from the configured level unless it is already set
    pub fn apply_log_level(&self) {
        if let Err(env::VarError::NotPresent) = env::var("RUST_LOG") {
            env::set_var("RUST_LOG", &self.log_level);
        }
    }
}
