// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `namespace.rs`

use crate::labels::{DEFAULT_OWNER_LABEL, PROJECT_ID_LABEL};
use crate::reconcilers::namespace::{
    assigned_project_id, effective_cluster_id, owner_label_value,
};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Helper function to create a namespace with the given labels
fn create_test_namespace(labels: BTreeMap<String, String>) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some("ns1".to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_owner_label_present() {
    let namespace = create_test_namespace(BTreeMap::from([(
        DEFAULT_OWNER_LABEL.to_string(),
        "DevOps".to_string(),
    )]));

    assert_eq!(
        owner_label_value(&namespace, DEFAULT_OWNER_LABEL),
        Some("DevOps".to_string())
    );
}

#[test]
fn test_owner_label_absent() {
    let namespace = create_test_namespace(BTreeMap::new());
    assert_eq!(owner_label_value(&namespace, DEFAULT_OWNER_LABEL), None);
}

#[test]
fn test_owner_label_empty_value() {
    // An empty owner value reads the same as no label at all
    let namespace = create_test_namespace(BTreeMap::from([(
        DEFAULT_OWNER_LABEL.to_string(),
        String::new(),
    )]));

    assert_eq!(owner_label_value(&namespace, DEFAULT_OWNER_LABEL), None);
}

#[test]
fn test_owner_label_custom_key() {
    let namespace = create_test_namespace(BTreeMap::from([(
        "teamOwner".to_string(),
        "storage".to_string(),
    )]));

    assert_eq!(owner_label_value(&namespace, DEFAULT_OWNER_LABEL), None);
    assert_eq!(
        owner_label_value(&namespace, "teamOwner"),
        Some("storage".to_string())
    );
}

#[test]
fn test_assigned_project_id() {
    let namespace = create_test_namespace(BTreeMap::from([
        (DEFAULT_OWNER_LABEL.to_string(), "DevOps".to_string()),
        (PROJECT_ID_LABEL.to_string(), "c-1:p-2".to_string()),
    ]));

    assert_eq!(assigned_project_id(&namespace), Some("c-1:p-2".to_string()));
}

#[test]
fn test_assigned_project_id_empty_is_unassigned() {
    let namespace = create_test_namespace(BTreeMap::from([(
        PROJECT_ID_LABEL.to_string(),
        String::new(),
    )]));

    assert_eq!(assigned_project_id(&namespace), None);
}

#[test]
fn test_unassigned_namespace() {
    let namespace = create_test_namespace(BTreeMap::from([(
        DEFAULT_OWNER_LABEL.to_string(),
        "DevOps".to_string(),
    )]));

    assert_eq!(assigned_project_id(&namespace), None);
}

#[test]
fn test_effective_cluster_id_from_project() {
    assert_eq!(effective_cluster_id("c-1234:p-5678", ""), "c-1234");
    assert_eq!(effective_cluster_id("c-1234:p-5678", "c-other"), "c-1234");
}

#[test]
fn test_effective_cluster_id_falls_back_to_detected() {
    assert_eq!(effective_cluster_id("p-5678", "c-detected"), "c-detected");
    assert_eq!(effective_cluster_id("p-5678", ""), "");
}
