// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed views of the Rancher management resources Paddock consumes.
//!
//! Rancher owns these CRDs (`management.cattle.io/v3`); the operator never
//! installs or mutates their definitions. Declaring them as typed resources
//! instead of poking at `DynamicObject` gives validated accessors that fail
//! explicitly on malformed server data.
//!
//! # Resource Types
//!
//! - [`Project`] - a Rancher project; the grouping object namespaces are
//!   assigned to. Namespaced: a project lives in the namespace named after
//!   its owning cluster id.
//! - [`Cluster`] - a Rancher-managed member cluster. Cluster-scoped; only its
//!   identity and `Ready` condition are consumed, to decide registry
//!   inclusion.
//!
//! # Example
//!
//! ```rust
//! use paddock::crd::{Project, ProjectSpec};
//!
//! let project = Project::new(
//!     "c-1234:p-5678",
//!     ProjectSpec {
//!         display_name: "DevOps".to_string(),
//!         cluster_name: "c-1234".to_string(),
//!         description: None,
//!     },
//! );
//! assert_eq!(project.display_name(), Some("DevOps"));
//! ```

use crate::constants::{CONDITION_READY, CONDITION_TRUE};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Specification of a Rancher `Project`.
///
/// Projects are named `<cluster-id>:<project-id>` and live in the namespace
/// named after their owning cluster. Only the fields the operator reads or
/// sets are declared; the remainder of the Rancher schema is ignored on
/// deserialization.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Project",
    namespaced,
    doc = "Project is the Rancher grouping object namespaces are assigned to. Projects are named <cluster-id>:<project-id> and live in the namespace named after their owning cluster."
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    /// Human-readable project name, matched against the namespace owner label
    #[serde(default)]
    pub display_name: String,

    /// Identifier of the cluster this project belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_name: String,

    /// Free-text project description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    /// The project's display name, if the server provided a non-blank one.
    ///
    /// Returns `None` for absent or whitespace-only values so callers never
    /// match against an effectively empty name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = self.spec.display_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Specification of a Rancher `Cluster`.
///
/// The operator only lists clusters; the spec is carried for completeness of
/// the typed view.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "management.cattle.io",
    version = "v3",
    kind = "Cluster",
    doc = "Cluster is a Rancher-managed member cluster. Only its identity and Ready condition are consumed, to decide registry inclusion."
)]
#[kube(status = "ClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Human-readable cluster name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Status subresource of a Rancher `Cluster`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Typed condition records; readiness is derived from the `Ready` entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// A single typed condition record on a cluster status.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type (e.g. `Ready`, `Provisioned`)
    pub r#type: String,

    /// Condition status (`True`, `False`, `Unknown`)
    pub status: String,

    /// Machine-readable reason for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// RFC3339 timestamp of the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl Cluster {
    /// Whether this cluster reports a `Ready` condition with status `True`.
    ///
    /// A missing status or condition list means not ready; malformed entries
    /// simply fail the check rather than erroring, so such clusters are
    /// excluded from the registry without aborting a refresh.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status.as_ref().is_some_and(|status| {
            status
                .conditions
                .iter()
                .any(|condition| condition.r#type == CONDITION_READY && condition.status == CONDITION_TRUE)
        })
    }
}

#[cfg(test)]
#[path = "crd_tests.rs"]
mod crd_tests;
