//! Construction of [`BuildParameters`] from defaulted options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    BuildConfiguration, BuildParameters, DebugInfoFormat, DebuggingParameters, DriverParameters,
    IndexStoreMode, LinkTimeOptimizationMode, LinkingParameters,
};
use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::flags::BuildFlags;
use crate::builder::toolchain::ToolchainDescriptor;
use crate::core::{host_triple, KnownTriple, PlatformTriple};

/// Output root used when none is given.
pub const DEFAULT_OUTPUT_ROOT: &str = "/path/to/build";

/// Worker count used when none is given.
pub const DEFAULT_WORKER_COUNT: u32 = 3;

/// Options accepted by [`create`].
///
/// Every field has a default; see [`BuildParameterOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildParameterOptions {
    pub output_root: PathBuf,
    pub configuration: BuildConfiguration,
    /// `None` uses the host's default toolchain
    #[serde(skip)]
    pub toolchain: Option<ToolchainDescriptor>,
    pub flags: BuildFlags,
    /// `None` uses the host triple
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_triple: Option<PlatformTriple>,
    pub index_store_mode: IndexStoreMode,
    pub pkg_config_directories: Vec<PathBuf>,
    pub use_explicit_module_build: bool,
    pub linker_dead_strip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_time_optimization_mode: Option<LinkTimeOptimizationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_frame_pointers: Option<bool>,
    /// `None` enables the entitlement for debug builds only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_enable_debugging_entitlement: Option<bool>,
    /// `None` picks the triple's default format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info_format: Option<DebugInfoFormat>,
    pub can_rename_entrypoint_function_name: bool,
    pub should_disable_local_rpath: bool,
    pub should_link_static_swift_stdlib: bool,
    pub worker_count: u32,
}

impl Default for BuildParameterOptions {
    fn default() -> Self {
        BuildParameterOptions {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            configuration: BuildConfiguration::Debug,
            toolchain: None,
            flags: BuildFlags::default(),
            target_triple: None,
            index_store_mode: IndexStoreMode::Off,
            pkg_config_directories: Vec::new(),
            use_explicit_module_build: false,
            linker_dead_strip: true,
            link_time_optimization_mode: None,
            omit_frame_pointers: None,
            should_enable_debugging_entitlement: None,
            debug_info_format: None,
            can_rename_entrypoint_function_name: false,
            should_disable_local_rpath: false,
            should_link_static_swift_stdlib: false,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl BuildParameterOptions {
    /// Options for a configuration, everything else defaulted.
    pub fn new(configuration: BuildConfiguration) -> Self {
        BuildParameterOptions {
            configuration,
            ..Default::default()
        }
    }

    /// Set the target triple.
    pub fn with_triple(mut self, triple: PlatformTriple) -> Self {
        self.target_triple = Some(triple);
        self
    }

    /// Set the toolchain.
    pub fn with_toolchain(mut self, toolchain: ToolchainDescriptor) -> Self {
        self.toolchain = Some(toolchain);
        self
    }
}

/// Create build parameters from options.
///
/// Fails with [`BuildError::Configuration`] when options contradict each
/// other. The toolchain is not checked against the triple.
pub fn create(options: BuildParameterOptions) -> BuildResult<BuildParameters> {
    let triple = options
        .target_triple
        .unwrap_or_else(|| host_triple().clone());
    let toolchain = options
        .toolchain
        .unwrap_or_else(|| ToolchainDescriptor::host_default().clone());

    if options.worker_count == 0 {
        return Err(BuildError::configuration("worker count must be at least 1"));
    }

    if options.should_link_static_swift_stdlib && triple.is_darwin() {
        return Err(BuildError::configuration(format!(
            "the Swift standard library cannot be linked statically on {}",
            triple
        )));
    }

    let debug_info_format = options
        .debug_info_format
        .unwrap_or_else(|| DebugInfoFormat::default_for(&triple));
    if debug_info_format == DebugInfoFormat::CodeView && !triple.is_windows() {
        return Err(BuildError::configuration(format!(
            "CodeView debug information is only supported on Windows, not {}",
            triple
        )));
    }

    let debugging = DebuggingParameters {
        triple: triple.clone(),
        debug_info_format,
        should_enable_debugging_entitlement: options
            .should_enable_debugging_entitlement
            .unwrap_or(options.configuration == BuildConfiguration::Debug),
        omit_frame_pointers: options.omit_frame_pointers,
    };

    let driver = DriverParameters {
        can_rename_entrypoint_function_name: options.can_rename_entrypoint_function_name,
        use_explicit_module_build: options.use_explicit_module_build,
    };

    let linking = LinkingParameters {
        linker_dead_strip: options.linker_dead_strip,
        link_time_optimization_mode: options.link_time_optimization_mode,
        should_disable_local_rpath: options.should_disable_local_rpath,
        should_link_static_swift_stdlib: options.should_link_static_swift_stdlib,
    };

    let params = BuildParameters {
        data_path: options.output_root,
        configuration: options.configuration,
        toolchain,
        triple,
        flags: options.flags,
        pkg_config_directories: options.pkg_config_directories,
        workers: options.worker_count,
        index_store_mode: options.index_store_mode,
        debugging,
        driver,
        linking,
    };

    tracing::debug!(
        triple = %params.triple,
        configuration = %params.configuration,
        workers = params.workers,
        "Created build parameters"
    );
    for warning in params.lint() {
        tracing::warn!("{}", warning.message);
    }

    Ok(params)
}

/// Platform in the closed test matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestPlatform {
    MacOs,
    Linux,
    Android,
    Windows,
}

impl TestPlatform {
    pub const ALL: [TestPlatform; 4] = [
        TestPlatform::MacOs,
        TestPlatform::Linux,
        TestPlatform::Android,
        TestPlatform::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestPlatform::MacOs => "macos",
            TestPlatform::Linux => "linux",
            TestPlatform::Android => "android",
            TestPlatform::Windows => "windows",
        }
    }

    /// Catalog entry this platform builds for.
    pub fn known_triple(&self) -> KnownTriple {
        match self {
            TestPlatform::MacOs => KnownTriple::X86_64MacOs,
            TestPlatform::Linux => KnownTriple::Arm64Linux,
            TestPlatform::Android => KnownTriple::Arm64Android,
            TestPlatform::Windows => KnownTriple::Windows,
        }
    }

    pub fn triple(&self) -> &'static PlatformTriple {
        self.known_triple().triple()
    }
}

impl fmt::Display for TestPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestPlatform {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "macosx" => Ok(TestPlatform::MacOs),
            "linux" => Ok(TestPlatform::Linux),
            "android" => Ok(TestPlatform::Android),
            "windows" => Ok(TestPlatform::Windows),
            _ => Err(BuildError::UnsupportedPlatform {
                platform: s.to_string(),
            }),
        }
    }
}

/// Create parameters for a test platform and configuration.
pub fn create_for_platform(
    platform: TestPlatform,
    configuration: BuildConfiguration,
) -> BuildResult<BuildParameters> {
    create(BuildParameterOptions::new(configuration).with_triple(platform.triple().clone()))
}

/// Create parameters for a platform given by name.
///
/// # Panics
///
/// Panics if `platform` is not one of the test matrix platforms. A missing
/// platform is a gap in the matrix, not something to recover from.
pub fn create_for_platform_name(
    platform: &str,
    configuration: BuildConfiguration,
) -> BuildResult<BuildParameters> {
    let platform: TestPlatform = platform.parse().unwrap_or_else(|err| panic!("{}", err));
    create_for_platform(platform, configuration)
}
