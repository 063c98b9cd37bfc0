//! Target definitions - what gets built.
//!
//! A Target is a compilable module in the package graph; a Product is a
//! linkable artifact assembled from targets.

mod core;
mod language;

pub use self::core::{Product, ProductKind, Target, TargetId, TargetKind};
pub use self::language::{Language, ModuleFamily};
