// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for the namespace controller.
//!
//! All reconcile invocations receive an `Arc<Context>` carrying:
//! - the management Kubernetes client
//! - the cluster registry (shared with the background refresh task)
//! - runtime settings resolved once at startup
//!
//! Scoping the registry here, rather than in ambient globals, keeps the
//! background refresh task and the reconciliation path on the same shared
//! ownership without exposing the raw map for direct mutation.

use crate::constants::{
    DEFAULT_REGISTRY_REFRESH_SECS, ENV_CREATE_PROJECTS, ENV_METRICS_ADDR, ENV_OWNER_LABEL,
    ENV_REGISTRY_REFRESH_SECS, METRICS_SERVER_BIND_ADDRESS, METRICS_SERVER_PORT,
};
use crate::labels::DEFAULT_OWNER_LABEL;
use crate::registry::ClusterRegistry;
use kube::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Shared context passed to every reconcile call.
#[derive(Clone)]
pub struct Context {
    /// Client bound to the management entry point
    pub client: Client,

    /// Registry of member-cluster clients, rebuilt periodically
    pub registry: Arc<ClusterRegistry>,

    /// Runtime settings resolved from the environment at startup
    pub settings: Settings,
}

/// Runtime settings, read once from environment variables with coded defaults.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Namespace label consulted for project ownership
    pub owner_label: String,

    /// Whether to create projects for owner values that match nothing
    pub create_projects: bool,

    /// Interval between cluster registry refreshes
    pub registry_refresh_interval: Duration,

    /// Listen address for the Prometheus metrics endpoint
    pub metrics_addr: SocketAddr,
}

impl Settings {
    /// Resolve settings from the process environment.
    ///
    /// Unset variables fall back to defaults; unparsable values are logged
    /// and fall back too, so a bad deployment manifest degrades loudly
    /// instead of crashing the operator.
    #[must_use]
    pub fn from_env() -> Self {
        let owner_label =
            std::env::var(ENV_OWNER_LABEL).unwrap_or_else(|_| DEFAULT_OWNER_LABEL.to_string());

        let create_projects = match std::env::var(ENV_CREATE_PROJECTS) {
            Ok(value) => parse_flag(&value),
            Err(_) => true,
        };

        let registry_refresh_interval = std::env::var(ENV_REGISTRY_REFRESH_SECS)
            .ok()
            .and_then(|value| match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!(%value, "ignoring invalid {ENV_REGISTRY_REFRESH_SECS}, using default");
                    None
                }
            })
            .map_or(
                Duration::from_secs(DEFAULT_REGISTRY_REFRESH_SECS),
                Duration::from_secs,
            );

        let metrics_addr = std::env::var(ENV_METRICS_ADDR)
            .ok()
            .and_then(|value| match value.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!(%value, "ignoring invalid {ENV_METRICS_ADDR}, using default");
                    None
                }
            })
            .unwrap_or_else(default_metrics_addr);

        Self {
            owner_label,
            create_projects,
            registry_refresh_interval,
            metrics_addr,
        }
    }
}

/// Parse a boolean-ish environment flag. Anything but an explicit negative
/// keeps the capability enabled.
pub(crate) fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

pub(crate) fn default_metrics_addr() -> SocketAddr {
    format!("{METRICS_SERVER_BIND_ADDRESS}:{METRICS_SERVER_PORT}")
        .parse()
        .expect("default metrics address is valid")
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
