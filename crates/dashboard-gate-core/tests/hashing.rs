// crates/dashboard-gate-core/tests/hashing.rs
// ============================================================================
// Module: Hashing Tests
// Description: Canonical JSON encoding and SHA-256 checksum rendering.
// ============================================================================
//! ## Overview
//! Validates key ordering at every depth, compact output, and lowercase hex.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use dashboard_gate_core::Checksum;
use dashboard_gate_core::hashing::canonical_json_bytes;
use dashboard_gate_core::hashing::checksum_canonical_json;
use dashboard_gate_core::hashing::sha256_checksum;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

#[test]
fn sha256_renders_lowercase_hex() {
    assert_eq!(
        sha256_checksum(b"abc"),
        Checksum::new("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[test]
fn canonical_bytes_sort_keys_at_every_depth() {
    let value = json!({
        "zeta": {"b": [3, {"y": 1, "x": 2}], "a": null},
        "alpha": "text",
    });

    let bytes = canonical_json_bytes(&value).unwrap();

    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"alpha":"text","zeta":{"a":null,"b":[3,{"x":2,"y":1}]}}"#
    );
}

#[test]
fn checksum_is_insertion_order_independent() {
    let mut map_a = Map::new();
    map_a.insert("b".to_string(), json!(2));
    map_a.insert("a".to_string(), json!(1));
    let mut map_b = Map::new();
    map_b.insert("a".to_string(), json!(1));
    map_b.insert("b".to_string(), json!(2));

    let hash_a = checksum_canonical_json(&Value::Object(map_a)).unwrap();
    let hash_b = checksum_canonical_json(&Value::Object(map_b)).unwrap();

    assert_eq!(hash_a, hash_b);
}

#[test]
fn array_order_is_significant() {
    let hash_a = checksum_canonical_json(&json!(["a", "b"])).unwrap();
    let hash_b = checksum_canonical_json(&json!(["b", "a"])).unwrap();

    assert_ne!(hash_a, hash_b);
}

#[test]
fn non_ascii_strings_are_not_escaped() {
    let bytes = canonical_json_bytes(&json!({"label": "Übersicht"})).unwrap();

    assert_eq!(String::from_utf8(bytes).unwrap(), "{\"label\":\"Übersicht\"}");
}
