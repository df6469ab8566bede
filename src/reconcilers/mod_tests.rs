// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `mod.rs`

use super::Outcome;

#[test]
fn test_outcome_metric_labels() {
    let assigned = Outcome::Assigned {
        project_id: "c-1:p-2".to_string(),
        cluster_id: "c-1".to_string(),
    };
    assert_eq!(assigned.metric_label(), "assigned");
    assert_eq!(Outcome::AlreadyAssigned.metric_label(), "already_assigned");
    assert_eq!(Outcome::NoOwnerLabel.metric_label(), "no_owner_label");
    assert_eq!(Outcome::NoMatch.metric_label(), "no_match");
    assert_eq!(Outcome::EmptyProjectId.metric_label(), "empty_project_id");
    assert_eq!(Outcome::Gone.metric_label(), "gone");
}

#[test]
fn test_only_assignment_changes_state() {
    let assigned = Outcome::Assigned {
        project_id: "c-1:p-2".to_string(),
        cluster_id: "c-1".to_string(),
    };
    assert!(assigned.changed());

    for outcome in [
        Outcome::AlreadyAssigned,
        Outcome::NoOwnerLabel,
        Outcome::NoMatch,
        Outcome::EmptyProjectId,
        Outcome::Gone,
    ] {
        assert!(!outcome.changed(), "{outcome:?} must be a no-op");
    }
}
