//! Build plan fixtures for common test scenarios.
//!
//! [`PlanFixture`] assembles a [`ResolvedBuildPlan`] target by target,
//! describing each one with parameters for the Linux test platform.

use crate::builder::description::{BuildProduct, ProductDescription, TargetDescription};
use crate::builder::parameters::{create_for_platform, BuildConfiguration, BuildParameters, TestPlatform};
use crate::builder::plan::ResolvedBuildPlan;
use crate::core::{Language, Product, ProductKind, Target, TargetId, TargetKind};

/// Package name used by fixtures unless overridden.
pub const FIXTURE_PACKAGE: &str = "pkg";

/// Debug parameters for the Linux test platform.
pub fn linux_debug_params() -> BuildParameters {
    create_for_platform(TestPlatform::Linux, BuildConfiguration::Debug)
        .expect("linux debug parameters")
}

/// Builder for a described build plan.
#[derive(Debug, Clone)]
pub struct PlanFixture {
    package: String,
    params: BuildParameters,
    plan: ResolvedBuildPlan,
}

impl Default for PlanFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFixture {
    pub fn new() -> Self {
        PlanFixture {
            package: FIXTURE_PACKAGE.to_string(),
            params: linux_debug_params(),
            plan: ResolvedBuildPlan::new(),
        }
    }

    /// Use different parameters for targets added from here on.
    pub fn with_params(mut self, params: BuildParameters) -> Self {
        self.params = params;
        self
    }

    /// Switch the package that following targets belong to.
    pub fn in_package(mut self, package: &str) -> Self {
        self.package = package.to_string();
        self
    }

    /// Add a described Swift library target.
    pub fn library(self, name: &str) -> Self {
        self.module(name, Language::Swift)
    }

    /// Add a described library target in the given language.
    pub fn module(self, name: &str, lang: Language) -> Self {
        let target = Target::library(&self.package, name).with_lang(lang);
        self.target(target)
    }

    /// Add a described Swift test target.
    pub fn test(self, name: &str) -> Self {
        let target = Target::test(&self.package, name);
        self.target(target)
    }

    /// Add a described executable target.
    pub fn executable(self, name: &str) -> Self {
        let target = Target::library(&self.package, name).with_kind(TargetKind::Executable);
        self.target(target)
    }

    /// Add an arbitrary target with its description.
    pub fn target(mut self, target: Target) -> Self {
        let description = TargetDescription::for_target(target.clone(), &self.params);
        self.plan
            .add_description(target.id.clone(), description)
            .add_target(target);
        self
    }

    /// Add a linkable executable product built from the target of the same name.
    pub fn executable_product(self, name: &str) -> Self {
        self.product(name, ProductKind::Executable)
    }

    /// Add a linkable product built from the target of the same name.
    pub fn product(mut self, name: &str, kind: ProductKind) -> Self {
        let product = Product::new(name, kind).with_target(TargetId::new(&self.package, name));
        self.plan
            .add_product(BuildProduct::Linkable(ProductDescription::new(product, &self.params)));
        self
    }

    /// Record a dependency between two targets of the current package.
    pub fn depends(mut self, from: &str, to: &str) -> Self {
        self.plan.add_dependency(
            &TargetId::new(&self.package, from),
            &TargetId::new(&self.package, to),
        );
        self
    }

    pub fn build(self) -> ResolvedBuildPlan {
        self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::plan::BuildPlan;

    #[test]
    fn test_fixture_describes_every_target() {
        let plan = PlanFixture::new()
            .library("Core")
            .executable("tool")
            .depends("tool", "Core")
            .executable_product("tool")
            .build();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.target_descriptions().count(), 2);
        assert_eq!(plan.products().len(), 1);
        assert_eq!(
            plan.topological_order()
                .into_iter()
                .map(|id| id.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Core", "tool"]
        );
    }
}
