// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Namespace reconciliation state machine.
//!
//! Each invocation walks a fixed sequence of terminal states: fetch the
//! namespace, bail on missing owner label or existing assignment, resolve
//! (or create) the project, derive the effective cluster id, and patch. Every
//! exit is either a no-op safe to re-invoke or an error safe to retry; the
//! patch call is the only external mutation and is atomic at the API layer.

use crate::context::Context;
use crate::labels::PROJECT_ID_LABEL;
use crate::metrics;
use crate::reconcilers::patch::apply_project_assignment;
use crate::reconcilers::project::{create_project, extract_cluster_id, find_project_by_name};
use crate::reconcilers::Outcome;
use anyhow::Result;
use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client, ResourceExt};
use tracing::{debug, info};

/// Reconcile a single namespace by name.
///
/// The namespace is re-fetched through the client for its detected cluster so
/// the decision runs against current state, not the watch event that
/// triggered it.
///
/// # Arguments
///
/// * `ctx` - Shared controller context
/// * `name` - Name of the namespace to reconcile
///
/// # Returns
///
/// The terminal [`Outcome`] of this invocation.
///
/// # Errors
///
/// Returns an error on any transport failure (fetch, resolution, creation,
/// patch); the scheduler requeues those with backoff.
pub async fn reconcile_namespace(ctx: &Context, name: &str) -> Result<Outcome> {
    let detected_cluster = detect_cluster_for_namespace(ctx, name);
    let client = cluster_client(ctx, &detected_cluster);

    let namespaces: Api<Namespace> = Api::all(client);
    let namespace = match namespaces.get(name).await {
        Ok(namespace) => namespace,
        Err(kube::Error::Api(ae)) if ae.code == 404 => {
            debug!(namespace = %name, "namespace deleted, nothing to do");
            return Ok(Outcome::Gone);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(owner) = owner_label_value(&namespace, &ctx.settings.owner_label) else {
        debug!(
            namespace = %name,
            owner_label = %ctx.settings.owner_label,
            "namespace does not have owner label, skipping"
        );
        return Ok(Outcome::NoOwnerLabel);
    };

    if let Some(project_id) = assigned_project_id(&namespace) {
        debug!(
            namespace = %name,
            project_id = %project_id,
            "namespace already assigned to project"
        );
        return Ok(Outcome::AlreadyAssigned);
    }

    info!(namespace = %name, owner = %owner, "processing namespace with owner label");

    let project = match find_project_by_name(&ctx.client, &owner, &detected_cluster).await? {
        Some(project) => {
            metrics::record_project_resolution("matched");
            project
        }
        None if ctx.settings.create_projects => {
            info!(namespace = %name, owner = %owner, "project not found, creating new project");
            let project = create_project(&ctx.client, &owner).await?;
            metrics::record_project_resolution("created");
            project
        }
        None => {
            metrics::record_project_resolution("no_match");
            info!(
                namespace = %name,
                owner = %owner,
                "no project matches owner, leaving namespace unassigned"
            );
            return Ok(Outcome::NoMatch);
        }
    };

    let project_id = project.name_any();
    let cluster_id = effective_cluster_id(&project_id, &detected_cluster);

    if project_id.is_empty() {
        info!(namespace = %name, owner = %owner, "project id is empty, skipping");
        return Ok(Outcome::EmptyProjectId);
    }

    let patch_client = cluster_client(ctx, &cluster_id);
    apply_project_assignment(&patch_client, &namespace.name_any(), &project_id, &cluster_id)
        .await?;

    info!(
        namespace = %name,
        project_id = %project_id,
        cluster_id = %cluster_id,
        "successfully assigned namespace to project"
    );
    Ok(Outcome::Assigned {
        project_id,
        cluster_id,
    })
}

/// Determine which cluster a namespace lives in.
///
/// The base deployment runs against the management cluster only, so detection
/// always yields the management cluster (encoded as an empty id). Replacing
/// this function is the seam for per-namespace detection; the state machine
/// above does not change.
fn detect_cluster_for_namespace(_ctx: &Context, _namespace: &str) -> String {
    String::new()
}

/// Resolve the client for a cluster id: a registry client for known member
/// clusters, the management client otherwise (including the management
/// cluster itself and clusters missing from the current snapshot).
fn cluster_client(ctx: &Context, cluster_id: &str) -> Client {
    if cluster_id.is_empty() || cluster_id == crate::constants::LOCAL_CLUSTER_ID {
        return ctx.client.clone();
    }
    ctx.registry.lookup(cluster_id).unwrap_or_else(|| {
        debug!(
            cluster = %cluster_id,
            "cluster not in registry, falling back to management client"
        );
        ctx.client.clone()
    })
}

/// The namespace's owner label value, if present and non-empty.
pub(crate) fn owner_label_value(namespace: &Namespace, owner_label: &str) -> Option<String> {
    namespace
        .labels()
        .get(owner_label)
        .filter(|value| !value.is_empty())
        .cloned()
}

/// The project id a namespace is already assigned to, if any.
///
/// A non-empty project-id label is the durable assignment state; once set,
/// reconciliation is terminal for that namespace.
pub(crate) fn assigned_project_id(namespace: &Namespace) -> Option<String> {
    namespace
        .labels()
        .get(PROJECT_ID_LABEL)
        .filter(|value| !value.is_empty())
        .cloned()
}

/// The cluster id to record on the namespace: the prefix of the project
/// identifier, or the detected cluster id when the identifier has no colon.
pub(crate) fn effective_cluster_id(project_id: &str, detected_cluster: &str) -> String {
    let from_project = extract_cluster_id(project_id);
    if from_project.is_empty() {
        detected_cluster.to_string()
    } else {
        from_project.to_string()
    }
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod namespace_tests;
