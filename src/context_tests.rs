// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `context.rs`

use crate::context::{default_metrics_addr, parse_flag};

#[test]
fn test_parse_flag_affirmative() {
    assert!(parse_flag("true"));
    assert!(parse_flag("TRUE"));
    assert!(parse_flag("1"));
    assert!(parse_flag("yes"));
    assert!(parse_flag("on"));
    // Unknown values keep the capability enabled
    assert!(parse_flag("anything-else"));
}

#[test]
fn test_parse_flag_negative() {
    assert!(!parse_flag("false"));
    assert!(!parse_flag("False"));
    assert!(!parse_flag("0"));
    assert!(!parse_flag("no"));
    assert!(!parse_flag("off"));
    assert!(!parse_flag(" off "));
}

#[test]
fn test_default_metrics_addr() {
    let addr = default_metrics_addr();
    assert_eq!(addr.port(), crate::constants::METRICS_SERVER_PORT);
    assert!(addr.ip().is_unspecified());
}
