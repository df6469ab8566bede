// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `registry.rs`

use crate::registry::proxied_cluster_url;
use url::Url;

#[test]
fn test_proxied_url_from_bare_host() {
    let base = Url::parse("https://rancher.example.com").unwrap();
    let proxied = proxied_cluster_url(&base, "c-m-abc123");
    assert_eq!(
        proxied.as_str(),
        "https://rancher.example.com/k8s/clusters/c-m-abc123"
    );
}

#[test]
fn test_proxied_url_preserves_existing_path() {
    let base = Url::parse("https://rancher.example.com/api-base").unwrap();
    let proxied = proxied_cluster_url(&base, "c-1234");
    assert_eq!(
        proxied.as_str(),
        "https://rancher.example.com/api-base/k8s/clusters/c-1234"
    );
}

#[test]
fn test_proxied_url_trims_trailing_slash() {
    let base = Url::parse("https://rancher.example.com/").unwrap();
    let proxied = proxied_cluster_url(&base, "c-1234");
    assert_eq!(
        proxied.as_str(),
        "https://rancher.example.com/k8s/clusters/c-1234"
    );
}

#[test]
fn test_proxied_url_is_idempotent() {
    // Re-deriving from an already-proxied base must not stack prefixes
    let base = Url::parse("https://rancher.example.com/k8s/clusters/c-1234").unwrap();
    let proxied = proxied_cluster_url(&base, "c-1234");
    assert_eq!(
        proxied.as_str(),
        "https://rancher.example.com/k8s/clusters/c-1234"
    );
}

#[test]
fn test_proxied_url_distinct_clusters_get_distinct_paths() {
    let base = Url::parse("https://rancher.example.com").unwrap();
    let first = proxied_cluster_url(&base, "c-1111");
    let second = proxied_cluster_url(&base, "c-2222");
    assert_ne!(first, second);
    assert!(first.path().ends_with("/k8s/clusters/c-1111"));
    assert!(second.path().ends_with("/k8s/clusters/c-2222"));
}

#[test]
fn test_proxied_url_keeps_scheme_and_port() {
    let base = Url::parse("https://rancher.example.com:8443").unwrap();
    let proxied = proxied_cluster_url(&base, "c-1234");
    assert_eq!(proxied.scheme(), "https");
    assert_eq!(proxied.port(), Some(8443));
    assert_eq!(proxied.path(), "/k8s/clusters/c-1234");
}
