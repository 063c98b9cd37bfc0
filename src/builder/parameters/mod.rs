//! Build parameters - configuration, triple, toolchain and per-phase knobs.
//!
//! [`BuildParameters`] is created once per build and never changes. Its
//! independent toggles are grouped by the phase that consumes them:
//! [`DebuggingParameters`], [`DriverParameters`] and [`LinkingParameters`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::flags::BuildFlags;
use crate::builder::toolchain::ToolchainDescriptor;
use crate::core::PlatformTriple;
use crate::util::diagnostic::Diagnostic;
use crate::util::hash::Fingerprint;

mod factory;

pub use factory::{
    create, create_for_platform, create_for_platform_name, BuildParameterOptions, TestPlatform,
    DEFAULT_OUTPUT_ROOT, DEFAULT_WORKER_COUNT,
};

/// Build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    #[default]
    Debug,
    Release,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 2] =
        [BuildConfiguration::Debug, BuildConfiguration::Release];

    /// Directory name used under the output root.
    pub fn dirname(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "debug",
            BuildConfiguration::Release => "release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dirname())
    }
}

/// Whether the compiler emits an index store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStoreMode {
    /// Enabled for debug builds on platforms that support it
    Auto,
    On,
    #[default]
    Off,
}

/// Link-time optimization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTimeOptimizationMode {
    Full,
    Thin,
}

impl LinkTimeOptimizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTimeOptimizationMode::Full => "full",
            LinkTimeOptimizationMode::Thin => "thin",
        }
    }
}

/// Debug information format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugInfoFormat {
    Dwarf,
    CodeView,
    None,
}

impl DebugInfoFormat {
    /// Default format for a triple: CodeView on Windows, DWARF elsewhere.
    pub fn default_for(triple: &PlatformTriple) -> Self {
        if triple.is_windows() {
            DebugInfoFormat::CodeView
        } else {
            DebugInfoFormat::Dwarf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebugInfoFormat::Dwarf => "dwarf",
            DebugInfoFormat::CodeView => "codeview",
            DebugInfoFormat::None => "none",
        }
    }
}

/// Knobs consumed when emitting debug information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggingParameters {
    /// Triple debug information is produced for
    pub triple: PlatformTriple,
    /// Debug information format
    pub debug_info_format: DebugInfoFormat,
    /// Sign executables so a debugger can attach
    pub should_enable_debugging_entitlement: bool,
    /// Frame pointer policy; `None` leaves the compiler default
    pub omit_frame_pointers: Option<bool>,
}

/// Knobs consumed by the compiler driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverParameters {
    /// Allow renaming `main` so executables can be linked into tests
    pub can_rename_entrypoint_function_name: bool,
    /// Build module dependencies explicitly ahead of compilation
    pub use_explicit_module_build: bool,
}

/// Knobs consumed by the linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkingParameters {
    /// Strip unreferenced code at link time
    pub linker_dead_strip: bool,
    /// Link-time optimization, if any
    pub link_time_optimization_mode: Option<LinkTimeOptimizationMode>,
    /// Do not add an rpath pointing at the build directory
    pub should_disable_local_rpath: bool,
    /// Link the Swift standard library statically
    pub should_link_static_swift_stdlib: bool,
}

impl Default for LinkingParameters {
    fn default() -> Self {
        LinkingParameters {
            linker_dead_strip: true,
            link_time_optimization_mode: None,
            should_disable_local_rpath: false,
            should_link_static_swift_stdlib: false,
        }
    }
}

/// Complete, immutable parameters of one build.
///
/// Created by [`create`]; the triple and toolchain are taken as given and
/// are not checked against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildParameters {
    data_path: PathBuf,
    configuration: BuildConfiguration,
    toolchain: ToolchainDescriptor,
    triple: PlatformTriple,
    flags: BuildFlags,
    pkg_config_directories: Vec<PathBuf>,
    workers: u32,
    index_store_mode: IndexStoreMode,
    debugging: DebuggingParameters,
    driver: DriverParameters,
    linking: LinkingParameters,
}

impl BuildParameters {
    /// Output root all build products are placed under.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Directory for this configuration's products.
    pub fn build_path(&self) -> PathBuf {
        self.data_path.join(self.configuration.dirname())
    }

    pub fn configuration(&self) -> BuildConfiguration {
        self.configuration
    }

    /// Check if this is a debug build.
    pub fn is_debug(&self) -> bool {
        self.configuration == BuildConfiguration::Debug
    }

    pub fn toolchain(&self) -> &ToolchainDescriptor {
        &self.toolchain
    }

    /// Triple the build produces code for.
    pub fn triple(&self) -> &PlatformTriple {
        &self.triple
    }

    pub fn flags(&self) -> &BuildFlags {
        &self.flags
    }

    pub fn pkg_config_directories(&self) -> &[PathBuf] {
        &self.pkg_config_directories
    }

    /// Number of parallel jobs.
    pub fn workers(&self) -> u32 {
        self.workers
    }

    pub fn index_store_mode(&self) -> IndexStoreMode {
        self.index_store_mode
    }

    pub fn debugging(&self) -> &DebuggingParameters {
        &self.debugging
    }

    pub fn driver(&self) -> &DriverParameters {
        &self.driver
    }

    pub fn linking(&self) -> &LinkingParameters {
        &self.linking
    }

    /// Warnings for option combinations that are valid but probably
    /// unintended.
    pub fn lint(&self) -> Vec<Diagnostic> {
        let mut warnings = Vec::new();

        if let Some(mode) = self.linking.link_time_optimization_mode {
            if self.is_debug() {
                warnings.push(
                    Diagnostic::warning(format!(
                        "{} link-time optimization requested for a debug build",
                        mode.as_str()
                    ))
                    .with_suggestion("Use the release configuration for optimized builds"),
                );
            }
        }

        if self.linking.should_disable_local_rpath && self.triple.is_windows() {
            warnings.push(Diagnostic::warning(format!(
                "disabling the local rpath has no effect on {}",
                self.triple
            )));
        }

        warnings
    }

    /// Cache key over everything that affects build output.
    ///
    /// The output root and worker count are excluded.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();

        fp.update_str(self.configuration.dirname())
            .update_str(&self.triple.to_string())
            .update_path(&self.toolchain.swift_compiler_path)
            .update_path(&self.toolchain.clang_compiler_path)
            .update_path(&self.toolchain.librarian_path)
            .update_opt(self.toolchain.sdk_root_path.as_deref().and_then(Path::to_str))
            .update_bool(self.toolchain.is_locally_built);

        for flags in [&self.toolchain.extra_flags, &self.flags] {
            for (tool, values) in flags.groups() {
                fp.update_str(tool)
                    .update_strs(values.iter().map(String::as_str));
            }
        }

        fp.update_str(self.debugging.debug_info_format.as_str())
            .update_bool(self.debugging.should_enable_debugging_entitlement)
            .update_opt(self.debugging.omit_frame_pointers.map(|b| if b { "omit" } else { "keep" }))
            .update_bool(self.driver.can_rename_entrypoint_function_name)
            .update_bool(self.driver.use_explicit_module_build)
            .update_bool(self.linking.linker_dead_strip)
            .update_opt(self.linking.link_time_optimization_mode.map(|m| m.as_str()))
            .update_bool(self.linking.should_disable_local_rpath)
            .update_bool(self.linking.should_link_static_swift_stdlib);

        fp.finish_short()
    }
}
