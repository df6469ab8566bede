// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Concurrently-readable registry of per-cluster Kubernetes clients.
//!
//! Rancher proxies member-cluster API traffic through the management entry
//! point at `<management-url>/k8s/clusters/<cluster-id>`. This module keeps a
//! cluster-id → [`Client`] map derived from that convention, rebuilt wholesale
//! on a fixed interval:
//!
//! - [`ClusterRegistry::lookup`] takes a shared lock only for the duration of
//!   one map read.
//! - [`ClusterRegistry::refresh`] lists the Rancher clusters, builds a
//!   complete candidate map without holding any lock, then swaps it in under
//!   an exclusive lock. Readers therefore always observe a complete snapshot,
//!   previous or new, never a partially-populated one.
//! - [`run_refresh_loop`] drives refreshes: once eagerly at startup, then on
//!   every tick until the root shutdown signal flips.
//!
//! Clients in the map live for one refresh cycle and are replaced wholesale,
//! never patched incrementally. A failed list leaves the previous snapshot
//! authoritative (stale-but-consistent); a failed per-cluster client
//! construction only omits that cluster.

use crate::constants::LOCAL_CLUSTER_ID;
use crate::crd::Cluster;
use crate::errors::RegistryError;
use crate::metrics;
use kube::{api::ListParams, Api, Client, Config, ResourceExt};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Registry of member-cluster clients, keyed by Rancher cluster id.
pub struct ClusterRegistry {
    /// Client bound to the management entry point
    mgmt_client: Client,

    /// Inferred management configuration; cloned and rewritten per cluster
    base_config: Config,

    /// Current snapshot. Locked only for reads and for the swap itself.
    clients: RwLock<HashMap<String, Client>>,
}

impl ClusterRegistry {
    /// Create an empty registry bound to the management client.
    ///
    /// `base_config` must be the configuration the management client was
    /// built from; its `cluster_url` is the base for proxied endpoints.
    #[must_use]
    pub fn new(mgmt_client: Client, base_config: Config) -> Self {
        Self {
            mgmt_client,
            base_config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the client for a member cluster.
    ///
    /// Returns `None` for unknown clusters, including the management cluster
    /// itself (callers fall back to the management client). The returned
    /// client is a cheap clone; the shared lock is released before returning.
    #[must_use]
    pub fn lookup(&self, cluster_id: &str) -> Option<Client> {
        let clients = self
            .clients
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        clients.get(cluster_id).cloned()
    }

    /// Number of clusters in the current snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the current snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild the snapshot from the clusters the management API reports.
    ///
    /// The management cluster is skipped (the built-in client already reaches
    /// it), clusters without a `Ready`/`True` condition are excluded, and a
    /// per-cluster client construction failure is logged and skipped. All
    /// network I/O happens before the exclusive lock, which is held only for
    /// the map swap.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ListFailed`] if the cluster list call fails;
    /// the previous snapshot remains authoritative in that case.
    pub async fn refresh(&self) -> Result<(), RegistryError> {
        let clusters: Api<Cluster> = Api::all(self.mgmt_client.clone());
        let list = clusters
            .list(&ListParams::default())
            .await
            .map_err(|e| RegistryError::ListFailed {
                reason: e.to_string(),
            })?;

        let mut candidate = HashMap::new();
        for cluster in &list.items {
            let cluster_id = cluster.name_any();
            if cluster_id == LOCAL_CLUSTER_ID {
                debug!(cluster = %cluster_id, "skipping management cluster");
                continue;
            }
            if !cluster.is_ready() {
                debug!(cluster = %cluster_id, "cluster not ready, excluding from registry");
                continue;
            }
            match self.build_cluster_client(&cluster_id) {
                Ok(client) => {
                    candidate.insert(cluster_id, client);
                }
                Err(e) => {
                    warn!(
                        cluster = %cluster_id,
                        error = %e,
                        "failed to construct proxied client, omitting cluster from registry"
                    );
                }
            }
        }

        let count = candidate.len();
        {
            let mut clients = self
                .clients
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *clients = candidate;
        }

        info!(clusters = count, "cluster registry refreshed");
        Ok(())
    }

    /// Construct a client bound to one member cluster's proxied endpoint.
    fn build_cluster_client(&self, cluster_id: &str) -> Result<Client, RegistryError> {
        let base = url::Url::parse(&self.base_config.cluster_url.to_string()).map_err(|e| {
            RegistryError::InvalidEndpoint {
                cluster: cluster_id.to_string(),
                reason: e.to_string(),
            }
        })?;
        let proxied = proxied_cluster_url(&base, cluster_id);

        let mut config = self.base_config.clone();
        config.cluster_url = proxied.as_str().parse().map_err(|e| {
            RegistryError::InvalidEndpoint {
                cluster: cluster_id.to_string(),
                reason: format!("{e}"),
            }
        })?;

        Client::try_from(config).map_err(|e| RegistryError::ClientConstructionFailed {
            cluster: cluster_id.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Rewrite a management URL into the proxied endpoint for a member cluster.
///
/// Appends `/k8s/clusters/<cluster-id>` to the base path. Idempotent: a base
/// that already ends with that suffix is returned unchanged, so re-deriving
/// an endpoint never stacks prefixes.
#[must_use]
pub fn proxied_cluster_url(base: &url::Url, cluster_id: &str) -> url::Url {
    let suffix = format!("{}/{cluster_id}", crate::constants::CLUSTER_PROXY_PATH);
    let path = base.path().trim_end_matches('/');

    let mut proxied = base.clone();
    if !path.ends_with(&suffix) {
        proxied.set_path(&format!("{path}{suffix}"));
    }
    proxied
}

/// Drive periodic registry refreshes until shutdown.
///
/// Performs one refresh eagerly, then refreshes on every `interval` tick.
/// Exits cleanly as soon as the root `shutdown` signal changes, without
/// leaking the timer. Refresh failures are logged and the loop keeps going;
/// consumers tolerate a snapshot up to one interval stale.
pub async fn run_refresh_loop(
    registry: Arc<ClusterRegistry>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    if let Err(e) = registry.refresh().await {
        warn!(error = %e, "initial cluster registry refresh failed");
        metrics::record_registry_refresh(false, 0);
    } else {
        metrics::record_registry_refresh(true, registry.len());
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick of a fresh interval completes immediately; the eager
    // refresh above already covered it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match registry.refresh().await {
                    Ok(()) => metrics::record_registry_refresh(true, registry.len()),
                    Err(e) => {
                        warn!(error = %e, "cluster registry refresh failed, keeping previous snapshot");
                        metrics::record_registry_refresh(false, registry.len());
                    }
                }
            }
            _ = shutdown.changed() => {
                info!("shutdown signal observed, stopping cluster registry refresh loop");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
