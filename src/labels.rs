// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label and annotation constants used across the reconcilers.
//!
//! This module defines the Rancher labels/annotations the operator reads and
//! writes, to ensure consistency across all patched resources.

// ============================================================================
// Rancher Project Assignment Labels
// ============================================================================

/// Label carrying the full project identifier (`<cluster-id>:<project-id>`) a
/// namespace is assigned to. A non-empty value marks the namespace as assigned.
pub const PROJECT_ID_LABEL: &str = "field.cattle.io/projectId";

/// Label carrying the identifier of the cluster owning the assigned project
pub const CLUSTER_ID_LABEL: &str = "field.cattle.io/clusterId";

// ============================================================================
// Rancher Project Assignment Annotations
// ============================================================================

/// Annotation mirroring [`PROJECT_ID_LABEL`]; Rancher reads both
pub const PROJECT_ID_ANNOTATION: &str = "field.cattle.io/projectId";

// ============================================================================
// Rancher Project Metadata
// ============================================================================

/// Label set on projects this operator creates, holding the display name
pub const PROJECT_NAME_LABEL: &str = "field.cattle.io/projectName";

/// Annotation set on projects this operator creates, holding the display name
pub const PROJECT_NAME_ANNOTATION: &str = "field.cattle.io/projectName";

// ============================================================================
// Ownership Labels
// ============================================================================

/// Default namespace label consulted to determine project ownership.
///
/// Overridable at runtime via `PADDOCK_OWNER_LABEL`.
pub const DEFAULT_OWNER_LABEL: &str = "appOwner";
