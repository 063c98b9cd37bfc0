//! Core data structures.
//!
//! This module contains the platform and package-graph types the build
//! configuration layer is expressed in:
//! - Platform triples and the triple catalog
//! - Targets, products and their identities

pub mod catalog;
pub mod target;
pub mod triple;

pub use catalog::{host_triple, KnownTriple, MINIMUM_MACOS_DEPLOYMENT_TARGET};
pub use target::{Language, ModuleFamily, Product, ProductKind, Target, TargetId, TargetKind};
pub use triple::PlatformTriple;
