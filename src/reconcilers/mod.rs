// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for namespace project assignment.
//!
//! Paddock follows the standard Kubernetes controller pattern:
//!
//! 1. **Watch** - Monitor namespace changes via the management API
//! 2. **Reconcile** - Decide whether the namespace needs a project assignment
//! 3. **Resolve** - Match the owner label against Rancher projects
//! 4. **Patch** - Merge the assignment labels/annotation onto the namespace
//!
//! # Available Reconcilers
//!
//! - [`reconcile_namespace`] - The per-namespace state machine
//!
//! # Supporting Modules
//!
//! - [`project`] - Project resolution, canonical id generation, creation
//! - [`patch`] - Merge-patch construction and application
//!
//! # Example: Using the Reconciler
//!
//! ```rust,no_run
//! use paddock::context::Context;
//! use paddock::reconcilers::reconcile_namespace;
//!
//! async fn reconcile(ctx: &Context) -> anyhow::Result<()> {
//!     let outcome = reconcile_namespace(ctx, "team-a-dev").await?;
//!     println!("reconciled: {}", outcome.metric_label());
//!     Ok(())
//! }
//! ```

pub mod namespace;
pub mod patch;
pub mod project;

pub use namespace::reconcile_namespace;
pub use patch::{apply_project_assignment, assignment_patch};
pub use project::{
    create_project, discover_cluster_id, extract_cluster_id, find_project_by_name,
    generate_project_id, project_matches,
};

/// Terminal outcome of one reconcile invocation.
///
/// Every variant other than [`Outcome::Assigned`] is a no-op: re-invoking
/// with unchanged external state performs no further mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The namespace was patched with a project assignment
    Assigned {
        /// Full `<cluster-id>:<project-id>` identifier that was assigned
        project_id: String,
        /// Cluster id recorded on the namespace (may be empty)
        cluster_id: String,
    },

    /// The namespace already carries a non-empty project-id label
    AlreadyAssigned,

    /// The namespace has no owner label (or an empty one)
    NoOwnerLabel,

    /// No project matched the owner value and creation is disabled
    NoMatch,

    /// The resolved project has an empty identifier
    EmptyProjectId,

    /// The namespace no longer exists
    Gone,
}

impl Outcome {
    /// Stable label for this outcome, used in metrics and logs.
    #[must_use]
    pub fn metric_label(&self) -> &'static str {
        match self {
            Outcome::Assigned { .. } => "assigned",
            Outcome::AlreadyAssigned => "already_assigned",
            Outcome::NoOwnerLabel => "no_owner_label",
            Outcome::NoMatch => "no_match",
            Outcome::EmptyProjectId => "empty_project_id",
            Outcome::Gone => "gone",
        }
    }

    /// Whether this outcome mutated external state.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Assigned { .. })
    }
}

#[cfg(test)]
mod mod_tests;
