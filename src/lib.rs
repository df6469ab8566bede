// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Paddock - Rancher Project Assignment Operator for Kubernetes
//!
//! Paddock is a Kubernetes operator written in Rust that keeps namespace
//! grouping metadata eventually consistent with Rancher Projects. It runs on
//! the Rancher management cluster and watches namespaces for an owner label;
//! when one appears, it resolves the matching Project and patches the
//! namespace with Rancher's assignment labels and annotation.
//!
//! ## Overview
//!
//! This library provides the core functionality for the Paddock operator,
//! including:
//!
//! - Typed views of the Rancher `Project` and `Cluster` resources
//! - The per-namespace reconciliation state machine
//! - Project resolution by display name, labels, and annotations
//! - A periodically-rebuilt registry of proxied member-cluster clients
//!
//! ## Modules
//!
//! - [`crd`] - Typed views of Rancher management resources
//! - [`reconcilers`] - Reconciliation state machine and project resolution
//! - [`registry`] - Cluster-id → client registry over the Rancher proxy
//! - [`context`] - Shared context and runtime settings
//! - [`errors`] - Structured error types with retry classification
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust
//! use paddock::reconcilers::{extract_cluster_id, generate_project_id};
//!
//! // Project identifiers are <cluster-id>:<project-id>
//! assert_eq!(extract_cluster_id("c-1234:p-5678"), "c-1234");
//! assert_eq!(extract_cluster_id("p-5678"), "");
//!
//! // Owner values canonicalize to Rancher-style project ids
//! assert_eq!(generate_project_id("My App!! Team"), "p-my-app-team");
//! ```
//!
//! ## Assignment Semantics
//!
//! - A namespace is claimed by at most one project; a non-empty
//!   `field.cattle.io/projectId` label makes it terminal.
//! - Matching is case-insensitive across `spec.displayName`, label values,
//!   and annotation values, first match in list order.
//! - All API traffic goes through the management entry point; member-cluster
//!   patches ride the `/k8s/clusters/<id>` proxy.

pub mod constants;
pub mod context;
pub mod crd;
pub mod errors;
pub mod labels;
pub mod metrics;
pub mod reconcilers;
pub mod registry;
