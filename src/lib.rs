//! Harbour build plan - build parameters and build plan inspection
//!
//! This crate provides the configuration layer of the Harbour build system:
//! platform triples, toolchain descriptors, build parameters for each test
//! platform, and a name-addressable index over completed build plans.

pub mod builder;
pub mod core;
pub mod util;

/// Test utilities for build plan unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides plan fixtures and a collection-backed
/// build plan.
#[cfg(test)]
pub mod test_support;

pub use builder::{
    BuildError, BuildParameters, BuildPlan, BuildPlanIndex, BuildResult, ResolvedBuildPlan,
    TestPlatform,
};
pub use self::core::{host_triple, KnownTriple, PlatformTriple, Target, TargetId};
