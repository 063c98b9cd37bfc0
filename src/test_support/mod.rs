//! Test utilities for build plan unit tests.
//!
//! This module provides plan fixtures, a hand-written [`BuildPlan`]
//! implementation independent of the graph-backed plan, and helpers for
//! checking an index against expectations.
//!
//! # Example
//!
//! ```rust,ignore
//! use harbour_buildplan::test_support::{init_tracing, PlanFixture};
//!
//! #[test]
//! fn test_example() {
//!     init_tracing();
//!     let plan = PlanFixture::new().library("Core").executable_product("Core").build();
//!     let index = BuildPlanIndex::build(&plan).unwrap();
//!     expect_names(index.target_names(), &["Core"]).unwrap();
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Once;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use crate::builder::description::{BuildProduct, TargetDescription};
use crate::builder::plan::BuildPlan;
use crate::core::{Target, TargetId};

// Re-export fixtures for convenience
pub use fixtures::*;

static TRACING: Once = Once::new();

/// Route tracing output through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A build plan held in plain collections.
///
/// Useful for plans a graph cannot express, such as descriptions listed in
/// a fixed order or graph entries that are looked up but never described.
#[derive(Debug, Clone, Default)]
pub struct MockBuildPlan {
    descriptions: Vec<(TargetId, TargetDescription)>,
    products: Vec<BuildProduct>,
    graph: HashMap<TargetId, Target>,
    derived: Vec<Vec<Target>>,
}

impl MockBuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package graph entry.
    pub fn graph_entry(&mut self, target: Target) -> &mut Self {
        self.graph.insert(target.id.clone(), target);
        self
    }

    /// Add a group of derived test targets.
    pub fn derived_group(&mut self, targets: Vec<Target>) -> &mut Self {
        self.derived.push(targets);
        self
    }

    /// Append a description, keeping insertion order.
    pub fn description(&mut self, id: TargetId, description: TargetDescription) -> &mut Self {
        self.descriptions.push((id, description));
        self
    }

    pub fn product(&mut self, product: BuildProduct) -> &mut Self {
        self.products.push(product);
        self
    }
}

impl BuildPlan for MockBuildPlan {
    fn target_descriptions(&self) -> impl Iterator<Item = (&TargetId, &TargetDescription)> {
        self.descriptions.iter().map(|(id, desc)| (id, desc))
    }

    fn products(&self) -> &[BuildProduct] {
        &self.products
    }

    fn graph_target(&self, id: &TargetId) -> Option<&Target> {
        self.graph.get(id)
    }

    fn derived_test_targets(&self) -> impl Iterator<Item = &[Target]> {
        self.derived.iter().map(Vec::as_slice)
    }
}

/// Check that `actual` yields exactly `expected`, in order.
pub fn expect_names<'a>(actual: impl IntoIterator<Item = &'a str>, expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = actual.into_iter().collect();
    if actual != expected {
        bail!("expected names {:?}, found {:?}", expected, actual);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::errors::BuildError;
    use crate::builder::plan_index::BuildPlanIndex;

    #[test]
    fn test_mock_plan_resolves_through_derived_groups() {
        let params = linux_debug_params();
        let main = Target::test("pkg", "pkgPackageTests");

        let mut plan = MockBuildPlan::new();
        plan.derived_group(vec![main.clone()]).description(
            main.id.clone(),
            TargetDescription::for_target(main, &params),
        );

        let index = BuildPlanIndex::build(&plan).unwrap();
        expect_names(index.target_names(), &["pkgPackageTests"]).unwrap();
    }

    #[test]
    fn test_mock_plan_duplicate_in_insertion_order() {
        let params = linux_debug_params();
        let first = Target::library("a", "Shared");
        let second = Target::library("b", "Shared");

        let mut plan = MockBuildPlan::new();
        plan.graph_entry(first.clone())
            .graph_entry(second.clone())
            .description(first.id.clone(), TargetDescription::for_target(first, &params))
            .description(second.id.clone(), TargetDescription::for_target(second, &params));

        assert_eq!(
            BuildPlanIndex::build(&plan).unwrap_err(),
            BuildError::DuplicateKey {
                kind: "target",
                name: "Shared".to_string()
            }
        );
    }

    #[test]
    fn test_expect_names_mismatch() {
        assert!(expect_names(["a", "b"], &["a", "b"]).is_ok());
        let err = expect_names(["a"], &["a", "b"]).unwrap_err();
        assert!(err.to_string().contains("expected names"));
    }
}
