// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `crd.rs`

use crate::crd::{Cluster, ClusterSpec, ClusterStatus, Condition, Project, ProjectSpec};

fn create_test_condition(r#type: &str, status: &str) -> Condition {
    Condition {
        r#type: r#type.to_string(),
        status: status.to_string(),
        reason: None,
        message: None,
        last_transition_time: None,
    }
}

fn create_test_cluster(conditions: Vec<Condition>) -> Cluster {
    let mut cluster = Cluster::new("c-m-abc123", ClusterSpec { display_name: None });
    cluster.status = Some(ClusterStatus { conditions });
    cluster
}

#[test]
fn test_cluster_ready() {
    let cluster = create_test_cluster(vec![create_test_condition("Ready", "True")]);
    assert!(cluster.is_ready());
}

#[test]
fn test_cluster_not_ready() {
    let cluster = create_test_cluster(vec![create_test_condition("Ready", "False")]);
    assert!(!cluster.is_ready());
}

#[test]
fn test_cluster_ready_among_other_conditions() {
    // Readiness is derived from the Ready entry regardless of its position
    let cluster = create_test_cluster(vec![
        create_test_condition("Provisioned", "True"),
        create_test_condition("Waiting", "False"),
        create_test_condition("Ready", "True"),
    ]);
    assert!(cluster.is_ready());
}

#[test]
fn test_cluster_wrong_condition_type() {
    let cluster = create_test_cluster(vec![create_test_condition("Provisioned", "True")]);
    assert!(!cluster.is_ready());
}

#[test]
fn test_cluster_no_status() {
    let cluster = Cluster::new("c-m-abc123", ClusterSpec { display_name: None });
    assert!(!cluster.is_ready());
}

#[test]
fn test_cluster_empty_conditions() {
    let cluster = create_test_cluster(vec![]);
    assert!(!cluster.is_ready());
}

#[test]
fn test_project_display_name() {
    let project = Project::new(
        "c-1234:p-5678",
        ProjectSpec {
            display_name: "DevOps".to_string(),
            cluster_name: "c-1234".to_string(),
            description: None,
        },
    );
    assert_eq!(project.display_name(), Some("DevOps"));
}

#[test]
fn test_project_display_name_blank() {
    // Absent and whitespace-only display names both read as None
    let project = Project::new("c-1234:p-5678", ProjectSpec::default());
    assert_eq!(project.display_name(), None);

    let project = Project::new(
        "c-1234:p-5678",
        ProjectSpec {
            display_name: "   ".to_string(),
            cluster_name: String::new(),
            description: None,
        },
    );
    assert_eq!(project.display_name(), None);
}

#[test]
fn test_project_spec_deserializes_rancher_shape() {
    let spec: ProjectSpec = serde_json::from_value(serde_json::json!({
        "displayName": "DevOps",
        "clusterName": "c-1234",
        "description": "platform team"
    }))
    .unwrap();

    assert_eq!(spec.display_name, "DevOps");
    assert_eq!(spec.cluster_name, "c-1234");
    assert_eq!(spec.description.as_deref(), Some("platform team"));
}

#[test]
fn test_cluster_status_deserializes_conditions() {
    let status: ClusterStatus = serde_json::from_value(serde_json::json!({
        "conditions": [
            { "type": "Ready", "status": "True", "lastTransitionTime": "2025-01-01T00:00:00Z" }
        ]
    }))
    .unwrap();

    assert_eq!(status.conditions.len(), 1);
    assert_eq!(status.conditions[0].r#type, "Ready");
    assert_eq!(status.conditions[0].status, "True");
    assert_eq!(
        status.conditions[0].last_transition_time.as_deref(),
        Some("2025-01-01T00:00:00Z")
    );
}
