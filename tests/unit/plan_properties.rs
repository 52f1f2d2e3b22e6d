//! Property-based tests for staging plan computation.
//!
//! Uses `proptest` to verify plan invariants across many random module
//! trees written into temporary checkouts.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;

use pdpkg::layout::{PackageKind, SourceLayout};
use pdpkg::plan::StagingPlan;
use pdpkg::stager::Stager;
use tempfile::TempDir;

use crate::helpers::write_checkout_skeleton;

/// Relative module paths: up to two directory levels, then a file name.
/// Directory names and file stems use disjoint alphabets so a generated
/// path can never collide with another path's directory.
fn arb_module_path() -> impl Strategy<Value = PathBuf> {
    (
        proptest::collection::vec("[a-d]{1,3}", 0..3),
        "[e-h]{1,4}",
    )
        .prop_map(|(dirs, stem)| {
            let mut path = PathBuf::new();
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{stem}.py"));
            path
        })
}

fn arb_module_tree() -> impl Strategy<Value = BTreeSet<PathBuf>> {
    proptest::collection::btree_set(arb_module_path(), 1..16)
}

fn arb_kind() -> impl Strategy<Value = PackageKind> {
    prop_oneof![Just(PackageKind::Deb), Just(PackageKind::Rpm)]
}

/// Write `paths` as empty module files under the checkout's module tree.
fn checkout_with_modules(paths: &BTreeSet<PathBuf>) -> (TempDir, SourceLayout) {
    let tmp = TempDir::new().expect("tempdir");
    write_checkout_skeleton(tmp.path());
    for rel in paths {
        let full = tmp.path().join("pdagent").join(rel);
        fs::create_dir_all(full.parent().expect("parent")).expect("dirs");
        fs::write(full, "").expect("module");
    }
    let sources = SourceLayout::from_source_dir(tmp.path());
    (tmp, sources)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Manifest line count is always header + blank + one per module file.
    #[test]
    fn prop_manifest_lines_track_module_files(paths in arb_module_tree()) {
        let (_tmp, sources) = checkout_with_modules(&paths);
        let plan = StagingPlan::compute(PackageKind::Deb, &sources).expect("plan");
        let manifest = plan.manifest.expect("manifest");
        prop_assert_eq!(manifest.content.lines().count(), 2 + paths.len());
        prop_assert!(manifest.content.starts_with("pyversions=2.6-\n\n"));
    }

    /// The planned module mirror is exactly the source tree's module
    /// files, prefixed with the kind's python root and the tree's name.
    #[test]
    fn prop_module_mirror_is_exact(paths in arb_module_tree(), kind in arb_kind()) {
        let (_tmp, sources) = checkout_with_modules(&paths);
        let plan = StagingPlan::compute(kind, &sources).expect("plan");
        let python_root = kind.policy().python_root;

        let expected: BTreeSet<String> = paths
            .iter()
            .map(|rel| format!("{python_root}/pdagent/{}", rel.display()))
            .collect();
        let actual: BTreeSet<String> = plan
            .copies
            .iter()
            .filter(|copy| copy.dest.starts_with(python_root))
            .map(|copy| copy.dest.display().to_string())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Every planned copy and directory exists after staging.
    #[test]
    fn prop_staged_tree_contains_every_planned_path(
        paths in arb_module_tree(),
        kind in arb_kind(),
    ) {
        let (tmp, sources) = checkout_with_modules(&paths);
        let data = tmp.path().join("data");
        let plan = StagingPlan::compute(kind, &sources).expect("plan");
        Stager::new(data.clone()).stage(&plan).expect("stage");

        for dir in &plan.dirs {
            prop_assert!(data.join(dir).is_dir(), "missing dir {}", dir.display());
        }
        for copy in &plan.copies {
            prop_assert!(data.join(&copy.dest).is_file(), "missing file {}", copy.dest.display());
        }
        if let Some(manifest) = &plan.manifest {
            prop_assert!(data.join(&manifest.dest).is_file());
        }
    }

    /// Computing the same plan twice yields identical results.
    #[test]
    fn prop_plan_is_deterministic(paths in arb_module_tree(), kind in arb_kind()) {
        let (_tmp, sources) = checkout_with_modules(&paths);
        let first = StagingPlan::compute(kind, &sources).expect("plan");
        let second = StagingPlan::compute(kind, &sources).expect("plan");
        prop_assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json"),
        );
    }
}
