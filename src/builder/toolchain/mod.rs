//! Toolchain description.
//!
//! A [`ToolchainDescriptor`] records where the compilers and librarian of a
//! toolchain live, which search paths it adds, and what it provides. It is
//! a plain value: paths are never checked for existence and no tool is run.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::builder::flags::BuildFlags;

mod detect;

pub use detect::{clang_vendor_is_apple, HostOs};

/// Metadata for a library shipped with the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryMetadata {
    /// Package identity the library stands in for
    pub identity: String,
    /// Version of the provided library
    pub version: String,
    /// Products the library provides
    pub product_names: Vec<String>,
}

impl LibraryMetadata {
    pub fn new(
        identity: impl Into<String>,
        version: impl Into<String>,
        product_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        LibraryMetadata {
            identity: identity.into(),
            version: version.into(),
            product_names: product_names.into_iter().map(|p| p.into()).collect(),
        }
    }
}

/// Executable locations, search paths and capabilities of a toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDescriptor {
    /// Librarian used to create static archives (libtool, link.exe, llvm-ar)
    pub librarian_path: PathBuf,

    /// Swift compiler driver
    pub swift_compiler_path: PathBuf,

    /// C-family compiler
    pub clang_compiler_path: PathBuf,

    /// Extra header search paths
    pub include_search_paths: Vec<PathBuf>,

    /// Extra library search paths
    pub library_search_paths: Vec<PathBuf>,

    /// Resource directory for dynamically linked Swift runtime
    pub swift_resources_path: Option<PathBuf>,

    /// Resource directory for statically linked Swift runtime
    pub swift_static_resources_path: Option<PathBuf>,

    /// SDK root, if the toolchain targets one
    pub sdk_root_path: Option<PathBuf>,

    /// Compiler plugin server
    pub plugin_server_path: Option<PathBuf>,

    /// Whether the toolchain was built from source locally
    pub is_locally_built: bool,

    /// Flags the toolchain adds to every invocation
    pub extra_flags: BuildFlags,

    /// Libraries shipped with the toolchain
    pub provided_libraries: Vec<LibraryMetadata>,

    /// Host family the descriptor was created for
    host: HostOs,
}

static HOST_DEFAULT: LazyLock<ToolchainDescriptor> = LazyLock::new(|| {
    let host = HostOs::current();
    tracing::debug!("Using default toolchain for {} host", host);
    ToolchainDescriptor::default_for(host)
});

impl ToolchainDescriptor {
    /// Default descriptor for a host family.
    ///
    /// Only the librarian differs between families.
    pub fn default_for(host: HostOs) -> Self {
        let librarian_path = match host {
            HostOs::MacOs => "/fake/path/to/libtool",
            HostOs::Windows => "/fake/path/to/link.exe",
            HostOs::Linux | HostOs::Other => "/fake/path/to/llvm-ar",
        };

        ToolchainDescriptor {
            librarian_path: PathBuf::from(librarian_path),
            swift_compiler_path: PathBuf::from("/fake/path/to/swiftc"),
            clang_compiler_path: PathBuf::from("/fake/path/to/clang"),
            include_search_paths: Vec::new(),
            library_search_paths: Vec::new(),
            swift_resources_path: None,
            swift_static_resources_path: None,
            sdk_root_path: None,
            plugin_server_path: None,
            is_locally_built: false,
            extra_flags: BuildFlags::default(),
            provided_libraries: Vec::new(),
            host,
        }
    }

    /// The process-wide default descriptor for the current host.
    pub fn host_default() -> &'static ToolchainDescriptor {
        &HOST_DEFAULT
    }

    /// Host family this descriptor was created for.
    pub fn host(&self) -> HostOs {
        self.host
    }

    /// Get the Swift compiler path.
    pub fn swift_compiler_path(&self) -> &Path {
        &self.swift_compiler_path
    }

    /// Get the C compiler path.
    pub fn clang_compiler_path(&self) -> &Path {
        &self.clang_compiler_path
    }

    /// Get the librarian path.
    pub fn librarian_path(&self) -> &Path {
        &self.librarian_path
    }

    /// Whether the C compiler is Apple's clang; `None` if unknown.
    pub fn is_clang_compiler_vendor_apple(&self) -> Option<bool> {
        clang_vendor_is_apple(self.host)
    }

    /// Set the Swift compiler path.
    pub fn with_swift_compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.swift_compiler_path = path.into();
        self
    }

    /// Set the C compiler path.
    pub fn with_clang_compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.clang_compiler_path = path.into();
        self
    }

    /// Set the SDK root.
    pub fn with_sdk_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.sdk_root_path = Some(path.into());
        self
    }

    /// Set the plugin server path.
    pub fn with_plugin_server(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_server_path = Some(path.into());
        self
    }

    /// Add header search paths.
    pub fn with_include_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.include_search_paths
            .extend(paths.into_iter().map(|p| p.into()));
        self
    }

    /// Add library search paths.
    pub fn with_library_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.library_search_paths
            .extend(paths.into_iter().map(|p| p.into()));
        self
    }

    /// Set the flags added to every invocation.
    pub fn with_extra_flags(mut self, flags: BuildFlags) -> Self {
        self.extra_flags = flags;
        self
    }

    /// Add a library shipped with the toolchain.
    pub fn with_provided_library(mut self, library: LibraryMetadata) -> Self {
        self.provided_libraries.push(library);
        self
    }

    /// Mark the toolchain as locally built.
    pub fn locally_built(mut self) -> Self {
        self.is_locally_built = true;
        self
    }
}

impl Default for ToolchainDescriptor {
    fn default() -> Self {
        Self::host_default().clone()
    }
}
