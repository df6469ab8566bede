// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `patch.rs`

use crate::reconcilers::patch::assignment_patch;
use serde_json::json;

#[test]
fn test_patch_with_cluster_id() {
    let patch = assignment_patch("c-1:p-2", "c-1");

    assert_eq!(
        patch,
        json!({
            "metadata": {
                "labels": {
                    "field.cattle.io/projectId": "c-1:p-2",
                    "field.cattle.io/clusterId": "c-1",
                },
                "annotations": {
                    "field.cattle.io/projectId": "c-1:p-2",
                },
            }
        })
    );
}

#[test]
fn test_patch_without_cluster_id() {
    // Empty cluster id omits the cluster label entirely
    let patch = assignment_patch("p-5678", "");

    assert_eq!(
        patch,
        json!({
            "metadata": {
                "labels": {
                    "field.cattle.io/projectId": "p-5678",
                },
                "annotations": {
                    "field.cattle.io/projectId": "p-5678",
                },
            }
        })
    );
}

#[test]
fn test_patch_touches_only_assignment_keys() {
    // A merge patch must name only the keys being added; everything else on
    // the namespace is the server's to preserve
    let patch = assignment_patch("c-1:p-2", "c-1");

    let metadata = patch.get("metadata").unwrap().as_object().unwrap();
    assert_eq!(metadata.len(), 2);

    let labels = metadata.get("labels").unwrap().as_object().unwrap();
    assert_eq!(labels.len(), 2);

    let annotations = metadata.get("annotations").unwrap().as_object().unwrap();
    assert_eq!(annotations.len(), 1);
}
