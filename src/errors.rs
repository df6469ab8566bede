// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for project resolution and the cluster registry.
//!
//! These errors provide structured error handling for the operator's two
//! failure domains:
//! - Cluster registry refreshes (listing clusters, constructing proxied clients)
//! - Project resolution and creation against the Rancher management API
//!
//! Reconcilers propagate them through `anyhow` so the controller's error
//! policy decides the retry cadence; the helpers here only classify.

use thiserror::Error;

/// Errors that can occur while rebuilding the cluster registry.
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    /// Listing the Rancher clusters through the management client failed.
    ///
    /// The refresh is abandoned for this cycle and the previous snapshot
    /// stays authoritative.
    #[error("Failed to list clusters from the management API: {reason}")]
    ListFailed {
        /// Underlying transport or server error
        reason: String,
    },

    /// The synthesized proxied endpoint for a member cluster is not a valid URL.
    #[error("Invalid proxied endpoint for cluster '{cluster}': {reason}")]
    InvalidEndpoint {
        /// The member cluster identifier
        cluster: String,
        /// Why the endpoint could not be parsed
        reason: String,
    },

    /// Constructing a client against a member cluster's proxied endpoint failed.
    ///
    /// The cluster is omitted from the new snapshot; the refresh continues.
    #[error("Failed to construct client for cluster '{cluster}': {reason}")]
    ClientConstructionFailed {
        /// The member cluster identifier
        cluster: String,
        /// Underlying construction error
        reason: String,
    },
}

/// Errors that can occur while resolving or creating Rancher projects.
#[derive(Error, Debug, Clone)]
pub enum ProjectError {
    /// Listing projects through the management client failed.
    #[error("Failed to list projects from the management API: {reason}")]
    ListFailed {
        /// Underlying transport or server error
        reason: String,
    },

    /// The race-safe existence check before creating a project failed with
    /// something other than not-found.
    #[error("Failed to check for existing project '{project}': {reason}")]
    LookupFailed {
        /// The composite project name that was checked
        project: String,
        /// Underlying transport or server error
        reason: String,
    },

    /// Creating a missing project failed.
    #[error("Failed to create project '{project}' in cluster '{cluster}': {reason}")]
    CreateFailed {
        /// The composite project name being created
        project: String,
        /// The cluster the project was destined for
        cluster: String,
        /// Underlying transport or server error
        reason: String,
    },

    /// No cluster identifier could be discovered from existing management
    /// state; project creation cannot compose a `<cluster-id>:<project-id>`
    /// name. Aborts only the creation path.
    #[error("Unable to determine a cluster id from existing resources")]
    ClusterIdUnresolvable,
}

/// Composite error type covering all operator failure domains.
#[derive(Error, Debug, Clone)]
pub enum OperatorError {
    /// Cluster registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Project resolution or creation error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Generic error for operations that don't fit other categories
    #[error("Operator error: {0}")]
    Generic(String),
}

impl OperatorError {
    /// Returns true if this error is transient and the reconciliation should
    /// simply be retried by the scheduler.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Registry(
                RegistryError::ListFailed { .. } | RegistryError::ClientConstructionFailed { .. },
            )
            | Self::Project(
                ProjectError::ListFailed { .. }
                | ProjectError::LookupFailed { .. }
                | ProjectError::CreateFailed { .. },
            )
            | Self::Generic(_) => true,

            Self::Registry(RegistryError::InvalidEndpoint { .. })
            | Self::Project(ProjectError::ClusterIdUnresolvable) => false,
        }
    }

    /// Returns a stable reason code for this error, used as a metrics label.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::Registry(RegistryError::ListFailed { .. }) => "ClusterListFailed",
            Self::Registry(RegistryError::InvalidEndpoint { .. }) => "InvalidProxyEndpoint",
            Self::Registry(RegistryError::ClientConstructionFailed { .. }) => {
                "ClientConstructionFailed"
            }

            Self::Project(ProjectError::ListFailed { .. }) => "ProjectListFailed",
            Self::Project(ProjectError::LookupFailed { .. }) => "ProjectLookupFailed",
            Self::Project(ProjectError::CreateFailed { .. }) => "ProjectCreateFailed",
            Self::Project(ProjectError::ClusterIdUnresolvable) => "ClusterIdUnresolvable",

            Self::Generic(_) => "OperatorError",
        }
    }
}

// Conversion from anyhow::Error to OperatorError for backward compatibility
impl From<anyhow::Error> for OperatorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Generic(err.to_string())
    }
}

/// Classify an `anyhow` error chain produced by a reconciliation.
///
/// Walks the chain for a known domain error and returns its reason code;
/// anything else is an API-transport failure from the Kubernetes client.
#[must_use]
pub fn status_reason_of(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(registry) = cause.downcast_ref::<RegistryError>() {
            return OperatorError::Registry(registry.clone()).status_reason();
        }
        if let Some(project) = cause.downcast_ref::<ProjectError>() {
            return OperatorError::Project(project.clone()).status_reason();
        }
    }
    "ApiError"
}

/// Whether an `anyhow` error chain represents a transient failure.
///
/// Unknown causes (raw Kubernetes client errors) are treated as transient;
/// the scheduler retries them with backoff.
#[must_use]
pub fn is_transient_error(err: &anyhow::Error) -> bool {
    for cause in err.chain() {
        if let Some(registry) = cause.downcast_ref::<RegistryError>() {
            return OperatorError::Registry(registry.clone()).is_transient();
        }
        if let Some(project) = cause.downcast_ref::<ProjectError>() {
            return OperatorError::Project(project.clone()).is_transient();
        }
    }
    true
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
