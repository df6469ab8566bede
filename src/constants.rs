// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Paddock operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Rancher API Constants
// ============================================================================

/// API group for Rancher management resources
pub const API_GROUP: &str = "management.cattle.io";

/// API version for Rancher management resources
pub const API_VERSION: &str = "v3";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "management.cattle.io/v3";

/// Kind name for the Rancher `Project` resource
pub const KIND_PROJECT: &str = "Project";

/// Kind name for the Rancher `Cluster` resource
pub const KIND_CLUSTER: &str = "Cluster";

/// Cluster identifier Rancher gives the management cluster itself.
///
/// The management cluster never goes through the proxy; the operator's own
/// client already points at it.
pub const LOCAL_CLUSTER_ID: &str = "local";

/// Path prefix Rancher uses to proxy API traffic to member clusters.
///
/// A member cluster `c-xxxxx` is reachable at
/// `<management-url>/k8s/clusters/c-xxxxx`.
pub const CLUSTER_PROXY_PATH: &str = "/k8s/clusters";

/// Condition type reported by Rancher for cluster readiness
pub const CONDITION_READY: &str = "Ready";

/// Condition status value for a satisfied condition
pub const CONDITION_TRUE: &str = "True";

// ============================================================================
// Project ID Generation Constants
// ============================================================================

/// Prefix forced onto generated project identifiers (Rancher convention `p-xxxxx`)
pub const GENERATED_PROJECT_ID_PREFIX: &str = "p-";

/// Maximum length of a generated project identifier
pub const GENERATED_PROJECT_ID_MAX_LEN: usize = 63;

// ============================================================================
// Cluster Registry Constants
// ============================================================================

/// Default interval between cluster registry refreshes (5 minutes)
pub const DEFAULT_REGISTRY_REFRESH_SECS: u64 = 300;

// ============================================================================
// Controller Error Handling Constants
// ============================================================================

/// Requeue duration for controller errors (30 seconds)
pub const ERROR_REQUEUE_DURATION_SECS: u64 = 30;

/// Requeue duration after a successful or no-op reconciliation (5 minutes)
pub const RECONCILE_REQUEUE_DURATION_SECS: u64 = 300;

/// Page size used when scanning namespaces during cluster-id discovery
pub const CLUSTER_ID_DISCOVERY_NAMESPACE_LIMIT: u32 = 10;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Port for Prometheus metrics HTTP server
pub const METRICS_SERVER_PORT: u16 = 8080;

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

/// Bind address for metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Overrides the namespace label consulted for project ownership
pub const ENV_OWNER_LABEL: &str = "PADDOCK_OWNER_LABEL";

/// Enables/disables creation of missing projects (`true`/`false`, default `true`)
pub const ENV_CREATE_PROJECTS: &str = "PADDOCK_CREATE_PROJECTS";

/// Overrides the cluster registry refresh interval, in seconds
pub const ENV_REGISTRY_REFRESH_SECS: &str = "PADDOCK_REGISTRY_REFRESH_SECS";

/// Overrides the metrics server listen address (`host:port`)
pub const ENV_METRICS_ADDR: &str = "PADDOCK_METRICS_ADDR";
