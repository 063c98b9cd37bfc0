//! Core target and product types.
//!
//! Targets are the compilable units of a package graph; products are the
//! artifacts assembled from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::language::{Language, ModuleFamily};

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    /// Library module
    #[default]
    #[serde(alias = "lib")]
    Library,

    /// Module containing an executable entry point
    #[serde(alias = "exe", alias = "bin")]
    Executable,

    /// Test module
    Test,

    /// Synthesized module hosting test entry points
    TestEntryPoint,
}

impl TargetKind {
    /// Check if this target only exists to run tests.
    pub fn is_test(&self) -> bool {
        matches!(self, TargetKind::Test | TargetKind::TestEntryPoint)
    }
}

/// Identity of a target within a package graph.
///
/// Two targets from different packages may share a display name; their
/// identities always differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId {
    /// Package that declares the target
    pub package: String,
    /// Target name within the package
    pub name: String,
}

impl TargetId {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        TargetId {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.package, self.name)
    }
}

/// A resolved target in the package graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique identity
    pub id: TargetId,

    /// Display name
    pub name: String,

    /// What kind of module this is
    #[serde(default)]
    pub kind: TargetKind,

    /// Source language
    #[serde(default)]
    pub lang: Language,
}

impl Target {
    /// Create a new target; its display name is the identity's target name.
    pub fn new(id: TargetId, kind: TargetKind, lang: Language) -> Self {
        Target {
            name: id.name.clone(),
            id,
            kind,
            lang,
        }
    }

    /// Create a Swift library target.
    pub fn library(package: &str, name: &str) -> Self {
        Self::new(TargetId::new(package, name), TargetKind::Library, Language::Swift)
    }

    /// Create a Swift test target.
    pub fn test(package: &str, name: &str) -> Self {
        Self::new(TargetId::new(package, name), TargetKind::Test, Language::Swift)
    }

    /// Set the source language.
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the target kind.
    pub fn with_kind(mut self, kind: TargetKind) -> Self {
        self.kind = kind;
        self
    }

    /// The module family this target compiles with.
    pub fn family(&self) -> ModuleFamily {
        self.lang.family()
    }
}

/// The kind of product being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    Executable,
    StaticLibrary,
    DynamicLibrary,
    Test,
}

impl ProductKind {
    /// Get the output filename for a product of this kind.
    pub fn output_filename(&self, name: &str, os: &str) -> String {
        match (self, os) {
            (ProductKind::Executable, "windows") => format!("{}.exe", name),
            (ProductKind::Executable, _) => name.to_string(),
            (ProductKind::StaticLibrary, "windows") => format!("{}.lib", name),
            (ProductKind::StaticLibrary, _) => format!("lib{}.a", name),
            (ProductKind::DynamicLibrary, "windows") => format!("{}.dll", name),
            (ProductKind::DynamicLibrary, "macos") => format!("lib{}.dylib", name),
            (ProductKind::DynamicLibrary, _) => format!("lib{}.so", name),
            (ProductKind::Test, "windows") => format!("{}.exe", name),
            (ProductKind::Test, _) => format!("{}.xctest", name),
        }
    }
}

/// A product assembled from one or more targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Artifact kind
    pub kind: ProductKind,

    /// Targets linked into the product
    #[serde(default)]
    pub targets: Vec<TargetId>,
}

impl Product {
    pub fn new(name: impl Into<String>, kind: ProductKind) -> Self {
        Product {
            name: name.into(),
            kind,
            targets: Vec::new(),
        }
    }

    /// Add a target linked into this product.
    pub fn with_target(mut self, id: TargetId) -> Self {
        self.targets.push(id);
        self
    }
}
