// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Merge-patch construction and application for project assignment.
//!
//! The patch is a partial document containing only the keys being added:
//! the project-id label and annotation, plus the cluster-id label when a
//! cluster id is known. The API server merges it over the namespace's
//! existing maps, so unrelated labels and annotations are preserved.

use crate::labels::{CLUSTER_ID_LABEL, PROJECT_ID_ANNOTATION, PROJECT_ID_LABEL};
use anyhow::Result;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{Patch, PatchParams},
    Api, Client,
};
use serde_json::json;
use tracing::debug;

/// Build the merge-patch document assigning a namespace to a project.
///
/// The cluster-id label is included only when `cluster_id` is non-empty.
#[must_use]
pub fn assignment_patch(project_id: &str, cluster_id: &str) -> serde_json::Value {
    let mut labels = serde_json::Map::new();
    labels.insert(PROJECT_ID_LABEL.to_string(), json!(project_id));
    if !cluster_id.is_empty() {
        labels.insert(CLUSTER_ID_LABEL.to_string(), json!(cluster_id));
    }

    json!({
        "metadata": {
            "labels": labels,
            "annotations": {
                PROJECT_ID_ANNOTATION: project_id,
            },
        }
    })
}

/// Apply the project-assignment merge patch to a namespace.
///
/// The patch travels through `client`, which the caller resolved for the
/// cluster owning the project (the management client for local namespaces, a
/// registry client for member clusters). Transport errors are returned
/// unmodified; the scheduler owns retries.
///
/// # Arguments
///
/// * `client` - Client for the cluster hosting the namespace
/// * `namespace` - Name of the namespace being assigned
/// * `project_id` - Full `<cluster-id>:<project-id>` identifier
/// * `cluster_id` - Cluster id to record, or empty to omit the label
///
/// # Errors
///
/// Returns an error if the patch call fails.
pub async fn apply_project_assignment(
    client: &Client,
    namespace: &str,
    project_id: &str,
    cluster_id: &str,
) -> Result<()> {
    let patch = assignment_patch(project_id, cluster_id);
    debug!(
        namespace = %namespace,
        project_id = %project_id,
        cluster_id = %cluster_id,
        "applying project assignment patch"
    );

    let namespaces: Api<Namespace> = Api::all(client.clone());
    namespaces
        .patch(namespace, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    Ok(())
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod patch_tests;
