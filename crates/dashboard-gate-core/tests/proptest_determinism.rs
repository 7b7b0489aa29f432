// crates/dashboard-gate-core/tests/proptest_determinism.rs
// ============================================================================
// Module: Resolution Property Tests
// Description: Property checks for resolution and checksum determinism.
// ============================================================================
//! ## Overview
//! Generates random section trees and grant sets and checks that resolution
//! is deterministic, partitions every node, and produces verifiable snapshots.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::collections::BTreeSet;

use dashboard_gate_core::FeatureSnapshot;
use dashboard_gate_core::ResolvedSection;
use dashboard_gate_core::Section;
use dashboard_gate_core::SnapshotId;
use dashboard_gate_core::generate_dashboard_snapshot_with_id;
use dashboard_gate_core::resolve_dashboard;
use dashboard_gate_core::verify_dashboard_snapshot;
use proptest::prelude::*;

use crate::common::context;
use crate::common::declaration;
use crate::common::entitlements;
use crate::common::permissions;

/// Grant names drawn from a small pool so requirements sometimes match.
fn grant_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0 .. 3)
        .prop_map(|items| items.into_iter().map(ToString::to_string).collect())
}

/// Optional requirement list.
fn requirement_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(grant_strategy())
}

/// Section trees with unique IDs assigned after generation.
fn tree_strategy() -> impl Strategy<Value = Vec<Section>> {
    let leaf = (requirement_strategy(), requirement_strategy()).prop_map(|(caps, feats)| Section {
        required_capabilities: caps,
        required_features: feats,
        ..Section::new("", "Leaf")
    });
    let node = leaf.prop_recursive(3, 24, 4, |inner| {
        (requirement_strategy(), prop::collection::vec(inner, 0 .. 4)).prop_map(
            |(caps, children)| Section {
                required_capabilities: caps,
                children: Some(children),
                ..Section::new("", "Node")
            },
        )
    });
    prop::collection::vec(node, 0 .. 4).prop_map(|mut sections| {
        let mut counter = 0;
        assign_ids(&mut sections, &mut counter);
        sections
    })
}

fn assign_ids(sections: &mut [Section], counter: &mut usize) {
    for section in sections {
        section.section_id = dashboard_gate_core::SectionId::new(format!("s{counter}"));
        *counter += 1;
        if let Some(children) = section.children.as_mut() {
            assign_ids(children, counter);
        }
    }
}

fn collect_visible(sections: &[ResolvedSection], out: &mut BTreeSet<String>) {
    for section in sections {
        out.insert(section.section_id.as_str().to_string());
        if let Some(children) = &section.children {
            collect_visible(children, out);
        }
    }
}

fn reachable_count(sections: &[Section], visible: &BTreeSet<String>) -> usize {
    sections
        .iter()
        .map(|section| {
            let below = if visible.contains(section.section_id.as_str()) {
                section.children.as_deref().map_or(0, |children| reachable_count(children, visible))
            } else {
                0
            };
            1 + below
        })
        .sum()
}

proptest! {
    #[test]
    fn resolution_is_deterministic_and_partitions_reached_nodes(
        sections in tree_strategy(),
        capabilities in grant_strategy(),
        enabled in grant_strategy(),
    ) {
        let mut decl = declaration();
        decl.sections = sections;
        let mut perms = permissions();
        perms.capabilities = capabilities;
        let feats = FeatureSnapshot {
            enabled_features: enabled,
            disabled_features: None,
        };

        let first = resolve_dashboard(&decl, &context(), &perms, &entitlements(), &feats).unwrap();
        let second = resolve_dashboard(&decl, &context(), &perms, &entitlements(), &feats).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.hidden_sections.len(), first.reasons.len());

        let mut visible = BTreeSet::new();
        collect_visible(&first.visible_sections, &mut visible);
        for hidden in &first.hidden_sections {
            prop_assert!(!visible.contains(hidden.as_str()));
        }
        prop_assert_eq!(
            visible.len() + first.hidden_sections.len(),
            reachable_count(&decl.sections, &visible)
        );
    }

    #[test]
    fn generated_snapshots_always_verify(
        sections in tree_strategy(),
        capabilities in grant_strategy(),
        expires_in_ms in prop::option::of(0u64 .. 10_000_000),
    ) {
        let mut decl = declaration();
        decl.sections = sections;
        let mut perms = permissions();
        perms.capabilities = capabilities;
        let resolved = resolve_dashboard(
            &decl,
            &context(),
            &perms,
            &entitlements(),
            &FeatureSnapshot::default(),
        )
        .unwrap();

        let first = generate_dashboard_snapshot_with_id(
            SnapshotId::new("a"),
            &decl,
            &resolved,
            &context(),
            expires_in_ms,
        )
        .unwrap();
        let second = generate_dashboard_snapshot_with_id(
            SnapshotId::new("b"),
            &decl,
            &resolved,
            &context(),
            expires_in_ms,
        )
        .unwrap();

        prop_assert!(verify_dashboard_snapshot(&first));
        prop_assert_eq!(first.checksum, second.checksum);
    }
}
