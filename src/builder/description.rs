//! Build descriptions for targets and products.
//!
//! A description is the build-ready form of a target or product: output
//! locations plus the arguments its tool is invoked with. Compile
//! arguments read only the debugging and driver parameters; link
//! arguments read only the linking parameters.

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::parameters::{BuildParameters, LinkTimeOptimizationMode};
use crate::core::{ModuleFamily, PlatformTriple, Product, ProductKind, Target, TargetId, TargetKind};

/// Description of a Swift module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwiftModuleDescription {
    pub target: Target,
    /// Directory holding the module's intermediate files
    pub temps_path: PathBuf,
    /// Emitted `.swiftmodule`
    pub module_output_path: PathBuf,
    /// Arguments passed to the Swift compiler
    pub compile_arguments: Vec<String>,
}

impl SwiftModuleDescription {
    pub fn new(target: Target, params: &BuildParameters) -> Self {
        let build_path = params.build_path();
        let mut args = vec![
            "-module-name".to_string(),
            target.name.clone(),
            "-target".to_string(),
            params.debugging().triple.to_string(),
        ];

        if params.is_debug() {
            args.extend(["-Onone", "-g", "-enable-testing"].map(String::from));
        } else {
            args.push("-O".to_string());
        }
        args.extend(frame_pointer_args(params.debugging().omit_frame_pointers));

        let driver = params.driver();
        if driver.use_explicit_module_build {
            args.push("-explicit-module-build".to_string());
        }
        if driver.can_rename_entrypoint_function_name && target.kind == TargetKind::Executable {
            args.extend([
                "-Xfrontend".to_string(),
                "-entry-point-function-name".to_string(),
                "-Xfrontend".to_string(),
                format!("{}_main", target.name),
            ]);
        }

        args.extend(params.toolchain().extra_flags.swift_compiler_flags.iter().cloned());
        args.extend(params.flags().swift_compiler_flags.iter().cloned());

        SwiftModuleDescription {
            temps_path: build_path.join(format!("{}.build", target.name)),
            module_output_path: build_path
                .join("Modules")
                .join(format!("{}.swiftmodule", target.name)),
            compile_arguments: args,
            target,
        }
    }
}

/// Description of a C-family module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClangModuleDescription {
    pub target: Target,
    /// Directory holding the module's object files
    pub temps_path: PathBuf,
    /// Arguments passed to the C compiler
    pub compile_arguments: Vec<String>,
}

impl ClangModuleDescription {
    pub fn new(target: Target, params: &BuildParameters) -> Self {
        let mut args = vec![
            "-target".to_string(),
            params.debugging().triple.to_string(),
        ];

        if params.is_debug() {
            args.extend(["-O0", "-g"].map(String::from));
        } else {
            args.push("-O2".to_string());
        }
        args.extend(frame_pointer_args(params.debugging().omit_frame_pointers));

        let toolchain = params.toolchain();
        for dir in &toolchain.include_search_paths {
            args.push(format!("-I{}", dir.display()));
        }
        args.extend(toolchain.extra_flags.c_compiler_flags.iter().cloned());
        args.extend(params.flags().c_compiler_flags.iter().cloned());

        ClangModuleDescription {
            temps_path: params.build_path().join(format!("{}.build", target.name)),
            compile_arguments: args,
            target,
        }
    }
}

fn frame_pointer_args(omit: Option<bool>) -> Option<String> {
    omit.map(|omit| {
        if omit {
            "-fomit-frame-pointer".to_string()
        } else {
            "-fno-omit-frame-pointer".to_string()
        }
    })
}

/// Build description of one target, by module family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum TargetDescription {
    Swift(SwiftModuleDescription),
    Clang(ClangModuleDescription),
}

impl TargetDescription {
    /// Describe a target, choosing the family from its language.
    pub fn for_target(target: Target, params: &BuildParameters) -> Self {
        match target.family() {
            ModuleFamily::Swift => {
                TargetDescription::Swift(SwiftModuleDescription::new(target, params))
            }
            ModuleFamily::Clang => {
                TargetDescription::Clang(ClangModuleDescription::new(target, params))
            }
        }
    }

    pub fn target(&self) -> &Target {
        match self {
            TargetDescription::Swift(desc) => &desc.target,
            TargetDescription::Clang(desc) => &desc.target,
        }
    }

    pub fn family(&self) -> ModuleFamily {
        match self {
            TargetDescription::Swift(_) => ModuleFamily::Swift,
            TargetDescription::Clang(_) => ModuleFamily::Clang,
        }
    }

    /// Narrow to a Swift module description.
    pub fn swift(&self) -> BuildResult<&SwiftModuleDescription> {
        match self {
            TargetDescription::Swift(desc) => Ok(desc),
            TargetDescription::Clang(_) => Err(self.mismatch(ModuleFamily::Swift)),
        }
    }

    /// Narrow to a C-family module description.
    pub fn clang(&self) -> BuildResult<&ClangModuleDescription> {
        match self {
            TargetDescription::Clang(desc) => Ok(desc),
            TargetDescription::Swift(_) => Err(self.mismatch(ModuleFamily::Clang)),
        }
    }

    fn mismatch(&self, expected: ModuleFamily) -> BuildError {
        BuildError::TypeMismatch {
            name: self.target().name.clone(),
            expected: expected.as_str(),
            found: self.family().as_str(),
        }
    }
}

/// Description of a linkable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDescription {
    pub product: Product,
    /// Final artifact location
    pub binary_path: PathBuf,
    /// Arguments passed to the linker driver
    pub linker_arguments: Vec<String>,
}

impl ProductDescription {
    pub fn new(product: Product, params: &BuildParameters) -> Self {
        let triple = params.triple();
        let binary_path = params
            .build_path()
            .join(product.kind.output_filename(&product.name, os_dirname(triple)));

        let mut args = vec!["-target".to_string(), triple.to_string()];
        let linking = params.linking();

        if linking.linker_dead_strip && product.kind != ProductKind::StaticLibrary {
            let flag = if triple.is_darwin() {
                "-dead_strip"
            } else if triple.is_windows() {
                "/OPT:REF"
            } else {
                "--gc-sections"
            };
            args.extend(["-Xlinker".to_string(), flag.to_string()]);
        }

        match linking.link_time_optimization_mode {
            Some(LinkTimeOptimizationMode::Full) => args.push("-lto=llvm-full".to_string()),
            Some(LinkTimeOptimizationMode::Thin) => args.push("-lto=llvm-thin".to_string()),
            None => {}
        }

        if !linking.should_disable_local_rpath && !triple.is_windows() {
            let origin = if triple.is_darwin() {
                "@loader_path"
            } else {
                "$ORIGIN"
            };
            args.extend(["-Xlinker", "-rpath", "-Xlinker", origin].map(String::from));
        }

        if linking.should_link_static_swift_stdlib {
            args.push("-static-stdlib".to_string());
        }

        for dir in &params.toolchain().library_search_paths {
            args.push(format!("-L{}", dir.display()));
        }
        args.extend(params.toolchain().extra_flags.linker_flags.iter().cloned());
        args.extend(params.flags().linker_flags.iter().cloned());

        ProductDescription {
            product,
            binary_path,
            linker_arguments: args,
        }
    }
}

fn os_dirname(triple: &PlatformTriple) -> &'static str {
    if triple.is_windows() {
        "windows"
    } else if triple.is_darwin() {
        "macos"
    } else {
        "linux"
    }
}

/// Description of a build-tool plugin; never linked into a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescription {
    pub name: String,
    /// Targets the plugin is applied to
    pub targets: Vec<TargetId>,
}

/// An entry of a build plan's product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildProduct {
    Linkable(ProductDescription),
    Plugin(PluginDescription),
}

impl BuildProduct {
    pub fn name(&self) -> &str {
        match self {
            BuildProduct::Linkable(desc) => &desc.product.name,
            BuildProduct::Plugin(desc) => &desc.name,
        }
    }
}
