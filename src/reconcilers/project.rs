// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Project resolution against the Rancher management API.
//!
//! Namespace owner labels carry free text ("DevOps"), while projects are
//! named `<cluster-id>:<project-id>`. This module bridges the two: it scans
//! project objects for a case-insensitive match across several metadata
//! locations, and can mint a missing project from a canonicalized form of the
//! owner value.

use crate::constants::{
    CLUSTER_ID_DISCOVERY_NAMESPACE_LIMIT, GENERATED_PROJECT_ID_MAX_LEN,
    GENERATED_PROJECT_ID_PREFIX, LOCAL_CLUSTER_ID,
};
use crate::crd::{Project, ProjectSpec};
use crate::errors::ProjectError;
use crate::labels::{CLUSTER_ID_LABEL, PROJECT_NAME_ANNOTATION, PROJECT_NAME_LABEL};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Find the project matching a free-text name.
///
/// Lists all projects visible through the management client, or only those in
/// the `cluster_hint` namespace when a concrete member-cluster hint is given
/// (empty or local hints mean unscoped). The first candidate in server list
/// order satisfying [`project_matches`] wins; no cross-candidate precedence
/// is applied.
///
/// # Arguments
///
/// * `client` - Management API client
/// * `name` - The owner label value to match
/// * `cluster_hint` - Cluster id to scope the listing to, if concrete
///
/// # Errors
///
/// Returns [`ProjectError::ListFailed`] if the list call fails; a missing
/// match is `Ok(None)`, not an error.
pub async fn find_project_by_name(
    client: &Client,
    name: &str,
    cluster_hint: &str,
) -> Result<Option<Project>, ProjectError> {
    debug!(project_name = %name, cluster_hint = %cluster_hint, "searching for project");

    let api: Api<Project> = if cluster_hint.is_empty() || cluster_hint == LOCAL_CLUSTER_ID {
        Api::all(client.clone())
    } else {
        Api::namespaced(client.clone(), cluster_hint)
    };

    let projects = api
        .list(&ListParams::default())
        .await
        .map_err(|e| ProjectError::ListFailed {
            reason: e.to_string(),
        })?;

    for project in projects.items {
        if project_matches(&project, name) {
            info!(
                project_name = %name,
                project_id = %project.name_any(),
                "found project by name match"
            );
            return Ok(Some(project));
        }
    }

    Ok(None)
}

/// Whether a project matches the given name.
///
/// Checks, in order, short-circuiting per candidate:
/// 1. `spec.displayName`, case-insensitively
/// 2. any label value, case-insensitively
/// 3. any annotation value, case-insensitively
#[must_use]
pub fn project_matches(project: &Project, name: &str) -> bool {
    let needle = name.to_lowercase();

    if let Some(display_name) = project.display_name() {
        if display_name.to_lowercase() == needle {
            return true;
        }
    }

    if project
        .labels()
        .values()
        .any(|value| value.to_lowercase() == needle)
    {
        return true;
    }

    project
        .annotations()
        .values()
        .any(|value| value.to_lowercase() == needle)
}

/// Derive a canonical project identifier from a display name.
///
/// Lowercases, maps spaces/underscores/periods to hyphens, strips everything
/// outside `[a-z0-9-]`, collapses hyphen runs, trims leading/trailing
/// hyphens, forces the Rancher `p-` prefix, and truncates to 63 characters
/// without leaving a trailing hyphen.
#[must_use]
pub fn generate_project_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        let mapped = match ch {
            ' ' | '_' | '.' => '-',
            c if c.is_ascii_alphanumeric() || c == '-' => c,
            _ => continue,
        };
        if mapped == '-' && (id.is_empty() || id.ends_with('-')) {
            continue;
        }
        id.push(mapped);
    }

    let trimmed = id.trim_end_matches('-');
    let mut id = if trimmed.starts_with(GENERATED_PROJECT_ID_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{GENERATED_PROJECT_ID_PREFIX}{trimmed}")
    };

    if id.len() > GENERATED_PROJECT_ID_MAX_LEN {
        id.truncate(GENERATED_PROJECT_ID_MAX_LEN);
        while id.ends_with('-') {
            id.pop();
        }
    }

    id
}

/// Extract the cluster id from a composite project identifier.
///
/// Project identifiers follow the `<cluster-id>:<project-id>` convention;
/// an identifier without a colon yields an empty cluster id.
#[must_use]
pub fn extract_cluster_id(project_id: &str) -> &str {
    match project_id.split_once(':') {
        Some((cluster_id, _)) => cluster_id,
        None => "",
    }
}

/// Discover a cluster id from existing management-cluster state.
///
/// Tried in order: the namespace of any existing project (projects live in
/// the namespace named after their cluster), the cluster-id prefix of that
/// project's name, and finally the `field.cattle.io/clusterId` label on a
/// bounded page of namespaces.
///
/// # Errors
///
/// Returns [`ProjectError::ClusterIdUnresolvable`] when no source yields a
/// non-empty id.
pub async fn discover_cluster_id(client: &Client) -> Result<String, ProjectError> {
    let projects: Api<Project> = Api::all(client.clone());
    match projects.list(&ListParams::default().limit(1)).await {
        Ok(list) => {
            if let Some(project) = list.items.first() {
                if let Some(cluster_id) = project.namespace().filter(|ns| !ns.is_empty()) {
                    debug!(cluster_id = %cluster_id, "found cluster id from existing project namespace");
                    return Ok(cluster_id);
                }
                let project_name = project.name_any();
                let cluster_id = extract_cluster_id(&project_name);
                if !cluster_id.is_empty() {
                    debug!(cluster_id = %cluster_id, "found cluster id from existing project name");
                    return Ok(cluster_id.to_string());
                }
            }
        }
        Err(e) => {
            debug!(error = %e, "unable to list projects while discovering cluster id");
        }
    }

    let namespaces: Api<Namespace> = Api::all(client.clone());
    let page = ListParams::default().limit(CLUSTER_ID_DISCOVERY_NAMESPACE_LIMIT);
    if let Ok(list) = namespaces.list(&page).await {
        for namespace in &list.items {
            if let Some(cluster_id) = namespace
                .labels()
                .get(CLUSTER_ID_LABEL)
                .filter(|value| !value.is_empty())
            {
                debug!(cluster_id = %cluster_id, "found cluster id from namespace label");
                return Ok(cluster_id.clone());
            }
        }
    }

    Err(ProjectError::ClusterIdUnresolvable)
}

/// Create a project for a display name that matched nothing.
///
/// Discovers the owning cluster id, composes the
/// `<cluster-id>:<generated-id>` name, and performs a race-safe existence
/// check before creating: a project created concurrently under the same name
/// is returned as-is instead of erroring.
///
/// # Errors
///
/// Returns [`ProjectError::ClusterIdUnresolvable`] when no cluster id can be
/// discovered, [`ProjectError::LookupFailed`] when the existence check fails
/// with something other than not-found, and [`ProjectError::CreateFailed`]
/// when the create call fails.
pub async fn create_project(client: &Client, display_name: &str) -> Result<Project, ProjectError> {
    let cluster_id = discover_cluster_id(client).await?;
    if cluster_id.is_empty() {
        return Err(ProjectError::ClusterIdUnresolvable);
    }

    let project_id = generate_project_id(display_name);
    let full_name = format!("{cluster_id}:{project_id}");

    let api: Api<Project> = Api::namespaced(client.clone(), &cluster_id);
    match api.get(&full_name).await {
        Ok(existing) => {
            info!(
                project_name = %display_name,
                project_id = %full_name,
                "project already exists with generated id"
            );
            return Ok(existing);
        }
        Err(kube::Error::Api(ae)) if ae.code == 404 => {}
        Err(e) => {
            return Err(ProjectError::LookupFailed {
                project: full_name,
                reason: e.to_string(),
            });
        }
    }

    let mut project = Project::new(
        &full_name,
        ProjectSpec {
            display_name: display_name.to_string(),
            cluster_name: cluster_id.clone(),
            description: None,
        },
    );
    project.metadata.namespace = Some(cluster_id.clone());
    project.metadata.labels = Some(BTreeMap::from([(
        PROJECT_NAME_LABEL.to_string(),
        display_name.to_string(),
    )]));
    project.metadata.annotations = Some(BTreeMap::from([(
        PROJECT_NAME_ANNOTATION.to_string(),
        display_name.to_string(),
    )]));

    let created = api
        .create(&PostParams::default(), &project)
        .await
        .map_err(|e| ProjectError::CreateFailed {
            project: full_name.clone(),
            cluster: cluster_id.clone(),
            reason: e.to_string(),
        })?;

    info!(
        project_name = %display_name,
        project_id = %full_name,
        cluster_id = %cluster_id,
        "created new project"
    );
    Ok(created)
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod project_tests;
