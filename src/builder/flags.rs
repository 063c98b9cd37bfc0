//! Extra compiler and linker flags.

use serde::{Deserialize, Serialize};

/// Flags passed through to each tool of the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildFlags {
    /// Flags for the C compiler
    pub c_compiler_flags: Vec<String>,

    /// Flags for the C++ compiler
    pub cxx_compiler_flags: Vec<String>,

    /// Flags for the Swift compiler
    pub swift_compiler_flags: Vec<String>,

    /// Flags for the linker
    pub linker_flags: Vec<String>,

    /// Flags for xcbuild-driven builds
    pub xcbuild_flags: Vec<String>,
}

impl BuildFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no flags are set for any tool.
    pub fn is_empty(&self) -> bool {
        self.c_compiler_flags.is_empty()
            && self.cxx_compiler_flags.is_empty()
            && self.swift_compiler_flags.is_empty()
            && self.linker_flags.is_empty()
            && self.xcbuild_flags.is_empty()
    }

    /// Append another flag set after this one.
    pub fn merge(&mut self, other: &BuildFlags) {
        self.c_compiler_flags.extend(other.c_compiler_flags.iter().cloned());
        self.cxx_compiler_flags
            .extend(other.cxx_compiler_flags.iter().cloned());
        self.swift_compiler_flags
            .extend(other.swift_compiler_flags.iter().cloned());
        self.linker_flags.extend(other.linker_flags.iter().cloned());
        self.xcbuild_flags.extend(other.xcbuild_flags.iter().cloned());
    }

    /// Add C compiler flags.
    pub fn with_c_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.c_compiler_flags
            .extend(flags.into_iter().map(|f| f.into()));
        self
    }

    /// Add Swift compiler flags.
    pub fn with_swift_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.swift_compiler_flags
            .extend(flags.into_iter().map(|f| f.into()));
        self
    }

    /// Add linker flags.
    pub fn with_linker_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.linker_flags.extend(flags.into_iter().map(|f| f.into()));
        self
    }

    /// Flag lists keyed by tool, in a stable order.
    pub(crate) fn groups(&self) -> [(&'static str, &[String]); 5] {
        [
            ("cc", &self.c_compiler_flags),
            ("cxx", &self.cxx_compiler_flags),
            ("swiftc", &self.swift_compiler_flags),
            ("ld", &self.linker_flags),
            ("xcbuild", &self.xcbuild_flags),
        ]
    }
}
