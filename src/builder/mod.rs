//! Build configuration and plan inspection.
//!
//! This module turns build options into immutable [`BuildParameters`],
//! describes how each target and product is built, and indexes completed
//! build plans by name.

pub mod description;
pub mod errors;
pub mod flags;
pub mod parameters;
pub mod plan;
pub mod plan_index;
pub mod toolchain;

pub use description::{
    BuildProduct, ClangModuleDescription, PluginDescription, ProductDescription,
    SwiftModuleDescription, TargetDescription,
};
pub use errors::{BuildError, BuildResult};
pub use flags::BuildFlags;
pub use parameters::{
    BuildConfiguration, BuildParameterOptions, BuildParameters, TestPlatform,
};
pub use plan::{BuildPlan, ResolvedBuildPlan};
pub use plan_index::{BuildPlanIndex, PlanSummary};
pub use toolchain::ToolchainDescriptor;
