//! Name-addressable index over a completed build plan.
//!
//! [`BuildPlanIndex::build`] resolves every target id of a plan to its
//! display name and checks that names are unique, so verification code can
//! look targets and products up by name. Construction either succeeds
//! completely or returns an error; no partial index is produced.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::Serialize;

use crate::builder::description::{
    BuildProduct, ClangModuleDescription, ProductDescription, SwiftModuleDescription,
    TargetDescription,
};
use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::plan::BuildPlan;
use crate::core::{ModuleFamily, ProductKind, Target, TargetId, TargetKind};

/// A place target ids are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupSource {
    /// The plan's package graph
    PackageGraph,
    /// Synthesized test targets, flattened across test products
    DerivedTestTargets,
}

/// Sources in the order they are tried.
const LOOKUP_ORDER: &[LookupSource] = &[
    LookupSource::PackageGraph,
    LookupSource::DerivedTestTargets,
];

/// Resolves target ids of one plan to targets.
struct TargetResolver<'p, P: BuildPlan> {
    plan: &'p P,
    derived: HashMap<&'p TargetId, &'p Target>,
}

impl<'p, P: BuildPlan> TargetResolver<'p, P> {
    fn new(plan: &'p P) -> Self {
        // An id listed under several test products keeps its first target
        let mut derived = HashMap::new();
        for target in plan.derived_test_targets().flatten() {
            derived.entry(&target.id).or_insert(target);
        }
        TargetResolver { plan, derived }
    }

    fn lookup(&self, source: LookupSource, id: &TargetId) -> Option<&'p Target> {
        match source {
            LookupSource::PackageGraph => self.plan.graph_target(id),
            LookupSource::DerivedTestTargets => self.derived.get(id).copied(),
        }
    }

    fn resolve(&self, id: &TargetId) -> BuildResult<&'p Target> {
        for &source in LOOKUP_ORDER {
            if let Some(target) = self.lookup(source, id) {
                if source != LookupSource::PackageGraph {
                    tracing::debug!("Resolved {} via {:?}", id, source);
                }
                return Ok(target);
            }
        }
        Err(BuildError::not_found("target id", id.to_string()))
    }
}

/// Targets and products of a build plan, addressable by name.
#[derive(Debug, Clone)]
pub struct BuildPlanIndex {
    targets: BTreeMap<String, TargetDescription>,
    products: BTreeMap<String, ProductDescription>,
}

impl BuildPlanIndex {
    /// Index a build plan.
    ///
    /// Fails with [`BuildError::NotFound`] when a described target id is in
    /// neither the package graph nor the derived test targets, and with
    /// [`BuildError::DuplicateKey`] when two targets or two products share
    /// a name. Plugin products are not indexed.
    pub fn build<P: BuildPlan>(plan: &P) -> BuildResult<Self> {
        let resolver = TargetResolver::new(plan);

        let mut targets = BTreeMap::new();
        for (id, description) in plan.target_descriptions() {
            let target = resolver.resolve(id)?;
            insert_unique(&mut targets, "target", &target.name, description)?;
        }

        let mut products = BTreeMap::new();
        for product in plan.products() {
            if let BuildProduct::Linkable(description) = product {
                insert_unique(&mut products, "product", &description.product.name, description)?;
            }
        }

        tracing::debug!(
            "Indexed build plan: {} targets, {} products",
            targets.len(),
            products.len()
        );

        Ok(BuildPlanIndex { targets, products })
    }

    /// Look up a target description by name.
    pub fn target(&self, name: &str) -> BuildResult<&TargetDescription> {
        self.targets
            .get(name)
            .ok_or_else(|| BuildError::not_found("target", name))
    }

    /// Look up a linkable product description by name.
    pub fn product(&self, name: &str) -> BuildResult<&ProductDescription> {
        self.products
            .get(name)
            .ok_or_else(|| BuildError::not_found("product", name))
    }

    /// Look up a target that must be a Swift module.
    pub fn swift_target(&self, name: &str) -> BuildResult<&SwiftModuleDescription> {
        self.target(name)?.swift()
    }

    /// Look up a target that must be a C-family module.
    pub fn clang_target(&self, name: &str) -> BuildResult<&ClangModuleDescription> {
        self.target(name)?.clang()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Verify the number of indexed targets.
    pub fn check_target_count(&self, expected: usize) -> BuildResult<()> {
        check_count("target", expected, self.target_count())
    }

    /// Verify the number of indexed products.
    pub fn check_product_count(&self, expected: usize) -> BuildResult<()> {
        check_count("product", expected, self.product_count())
    }

    /// Target names in sorted order.
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Product names in sorted order.
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// A serializable overview for verification reports.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            targets: self
                .targets
                .iter()
                .map(|(name, desc)| TargetSummary {
                    name: name.clone(),
                    family: desc.family(),
                    kind: desc.target().kind,
                })
                .collect(),
            products: self
                .products
                .iter()
                .map(|(name, desc)| ProductSummary {
                    name: name.clone(),
                    kind: desc.product.kind,
                    binary_path: desc.binary_path.clone(),
                })
                .collect(),
        }
    }
}

fn insert_unique<T: Clone>(
    map: &mut BTreeMap<String, T>,
    kind: &'static str,
    name: &str,
    value: &T,
) -> BuildResult<()> {
    match map.entry(name.to_string()) {
        Entry::Occupied(_) => Err(BuildError::DuplicateKey {
            kind,
            name: name.to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(value.clone());
            Ok(())
        }
    }
}

fn check_count(kind: &'static str, expected: usize, found: usize) -> BuildResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(BuildError::CountMismatch {
            kind,
            expected,
            found,
        })
    }
}

/// Overview of an indexed build plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub targets: Vec<TargetSummary>,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummary {
    pub name: String,
    pub family: ModuleFamily,
    pub kind: TargetKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub kind: ProductKind,
    pub binary_path: PathBuf,
}

impl PlanSummary {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
