//! Build plans.
//!
//! A build plan pairs every target of a package graph with its build
//! description and lists the products to link. Plans are produced by the
//! planning stage; this module defines what the rest of the build needs
//! from one ([`BuildPlan`]) and an in-memory plan backed by a target graph
//! ([`ResolvedBuildPlan`]).

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;

use crate::builder::description::{BuildProduct, TargetDescription};
use crate::core::{Target, TargetId};

/// What a completed build plan exposes.
pub trait BuildPlan {
    /// Every target id paired with its build description.
    fn target_descriptions(&self) -> impl Iterator<Item = (&TargetId, &TargetDescription)>;

    /// Products in plan order.
    fn products(&self) -> &[BuildProduct];

    /// Look up a target in the package graph.
    fn graph_target(&self, id: &TargetId) -> Option<&Target>;

    /// Synthesized test targets, grouped by the test product they serve.
    fn derived_test_targets(&self) -> impl Iterator<Item = &[Target]>;
}

/// An in-memory build plan over a directed target graph.
///
/// An edge `a -> b` means `a` depends on `b`.
#[derive(Debug, Clone, Default)]
pub struct ResolvedBuildPlan {
    /// Target graph
    graph: DiGraph<Target, ()>,

    /// Map from target id to node index
    id_to_node: HashMap<TargetId, NodeIndex>,

    /// Descriptions keyed by target id
    descriptions: BTreeMap<TargetId, TargetDescription>,

    /// Products in plan order
    products: Vec<BuildProduct>,

    /// Synthesized test targets keyed by test product name
    derived_test_targets: BTreeMap<String, Vec<Target>>,
}

impl ResolvedBuildPlan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target to the package graph.
    ///
    /// Adding an id twice keeps the first target.
    pub fn add_target(&mut self, target: Target) -> &mut Self {
        if !self.id_to_node.contains_key(&target.id) {
            let id = target.id.clone();
            let node = self.graph.add_node(target);
            self.id_to_node.insert(id, node);
        }
        self
    }

    /// Add a dependency edge; ignored unless both targets are in the graph.
    pub fn add_dependency(&mut self, from: &TargetId, to: &TargetId) -> &mut Self {
        if let (Some(&from_node), Some(&to_node)) =
            (self.id_to_node.get(from), self.id_to_node.get(to))
        {
            if !self.graph.contains_edge(from_node, to_node) {
                self.graph.add_edge(from_node, to_node, ());
            }
        }
        self
    }

    /// Record a synthesized test target for a test product.
    ///
    /// The target is not added to the package graph.
    pub fn add_derived_test_target(&mut self, product: &str, target: Target) -> &mut Self {
        self.derived_test_targets
            .entry(product.to_string())
            .or_default()
            .push(target);
        self
    }

    /// Attach a build description to a target id.
    ///
    /// The id does not have to be in the graph; indexing such a plan fails.
    pub fn add_description(&mut self, id: TargetId, description: TargetDescription) -> &mut Self {
        self.descriptions.insert(id, description);
        self
    }

    /// Append a product.
    pub fn add_product(&mut self, product: BuildProduct) -> &mut Self {
        self.products.push(product);
        self
    }

    /// Number of targets in the package graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct dependencies of a target.
    pub fn dependencies(&self, id: &TargetId) -> Vec<&TargetId> {
        match self.id_to_node.get(id) {
            Some(&node) => self
                .graph
                .neighbors(node)
                .map(|n| &self.graph[n].id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Targets in build order (dependencies before dependents).
    pub fn topological_order(&self) -> Vec<&TargetId> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::new();

        while let Some(node) = topo.next(&self.graph) {
            order.push(&self.graph[node].id);
        }

        // Topo yields a before b for an edge a -> b, i.e. dependents first
        order.reverse();
        order
    }
}

impl BuildPlan for ResolvedBuildPlan {
    fn target_descriptions(&self) -> impl Iterator<Item = (&TargetId, &TargetDescription)> {
        self.descriptions.iter()
    }

    fn products(&self) -> &[BuildProduct] {
        &self.products
    }

    fn graph_target(&self, id: &TargetId) -> Option<&Target> {
        self.id_to_node.get(id).map(|&node| &self.graph[node])
    }

    fn derived_test_targets(&self) -> impl Iterator<Item = &[Target]> {
        self.derived_test_targets.values().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topological_order() {
        let app = Target::library("pkg", "App");
        let core = Target::library("pkg", "Core");
        let util = Target::library("pkg", "Util");

        let mut plan = ResolvedBuildPlan::new();
        plan.add_target(app.clone())
            .add_target(core.clone())
            .add_target(util.clone())
            .add_dependency(&app.id, &core.id)
            .add_dependency(&core.id, &util.id);

        let order = plan.topological_order();
        assert_eq!(order, vec![&util.id, &core.id, &app.id]);
        assert_eq!(plan.dependencies(&app.id), vec![&core.id]);
    }

    #[test]
    fn test_duplicate_target_keeps_first() {
        let mut plan = ResolvedBuildPlan::new();
        plan.add_target(Target::library("pkg", "Core"))
            .add_target(Target::test("pkg", "Core"));

        assert_eq!(plan.len(), 1);
        let target = plan.graph_target(&TargetId::new("pkg", "Core")).unwrap();
        assert!(!target.kind.is_test());
    }

    #[test]
    fn test_derived_targets_stay_out_of_graph() {
        let mut plan = ResolvedBuildPlan::new();
        plan.add_derived_test_target("PkgPackageTests", Target::test("pkg", "PkgTestMain"));

        assert!(plan.is_empty());
        assert!(plan
            .graph_target(&TargetId::new("pkg", "PkgTestMain"))
            .is_none());
        assert_eq!(plan.derived_test_targets().flatten().count(), 1);
    }

    #[test]
    fn test_dependency_on_unknown_target_is_ignored() {
        let core = Target::library("pkg", "Core");
        let mut plan = ResolvedBuildPlan::new();
        plan.add_target(core.clone())
            .add_dependency(&core.id, &TargetId::new("other", "Missing"));

        assert!(plan.dependencies(&core.id).is_empty());
    }
}
