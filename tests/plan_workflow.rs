//! Integration tests for the build plan workflow.
//!
//! These tests drive the public API from build options through parameter
//! creation, plan assembly and indexing.

use harbour_buildplan::builder::parameters::{
    create, create_for_platform, create_for_platform_name, BuildConfiguration,
    BuildParameterOptions,
};
use harbour_buildplan::builder::{
    BuildProduct, PluginDescription, ProductDescription, TargetDescription,
};
use harbour_buildplan::core::{Language, Product, ProductKind, TargetKind};
use harbour_buildplan::{
    BuildError, BuildParameters, BuildPlanIndex, KnownTriple, ResolvedBuildPlan, Target,
    TargetId, TestPlatform,
};

/// Describe a package of an executable, its library and their tests.
fn sample_plan(params: &BuildParameters) -> ResolvedBuildPlan {
    let tool = Target::library("tool", "tool").with_kind(TargetKind::Executable);
    let core = Target::library("tool", "ToolCore");
    let shim = Target::library("tool", "CShim").with_lang(Language::C);
    let tests = Target::test("tool", "ToolCoreTests");
    let entry = Target::test("tool", "toolPackageTests").with_kind(TargetKind::TestEntryPoint);

    let mut plan = ResolvedBuildPlan::new();
    for target in [&tool, &core, &shim, &tests] {
        plan.add_target(target.clone()).add_description(
            target.id.clone(),
            TargetDescription::for_target(target.clone(), params),
        );
    }
    plan.add_dependency(&tool.id, &core.id)
        .add_dependency(&core.id, &shim.id)
        .add_dependency(&tests.id, &core.id)
        .add_derived_test_target("toolPackageTests", entry.clone())
        .add_description(entry.id.clone(), TargetDescription::for_target(entry, params));

    let exe = Product::new("tool", ProductKind::Executable)
        .with_target(tool.id.clone())
        .with_target(core.id.clone());
    let test_bundle = Product::new("toolPackageTests", ProductKind::Test).with_target(tests.id);
    plan.add_product(BuildProduct::Linkable(ProductDescription::new(exe, params)))
        .add_product(BuildProduct::Linkable(ProductDescription::new(test_bundle, params)))
        .add_product(BuildProduct::Plugin(PluginDescription {
            name: "Codegen".to_string(),
            targets: vec![core.id],
        }));
    plan
}

// ============================================================================
// Plan indexing
// ============================================================================

#[test]
fn test_index_sample_plan() {
    let params = create_for_platform(TestPlatform::Linux, BuildConfiguration::Debug).unwrap();
    let plan = sample_plan(&params);
    let index = BuildPlanIndex::build(&plan).unwrap();

    index.check_target_count(5).unwrap();
    index.check_product_count(2).unwrap();
    assert_eq!(
        index.target_names().collect::<Vec<_>>(),
        vec!["CShim", "ToolCore", "ToolCoreTests", "tool", "toolPackageTests"]
    );

    let core = index.swift_target("ToolCore").unwrap();
    assert!(core.compile_arguments.contains(&"-enable-testing".to_string()));
    assert!(index.clang_target("CShim").is_ok());

    let exe = index.product("tool").unwrap();
    assert!(exe
        .linker_arguments
        .windows(2)
        .any(|pair| pair == ["-Xlinker", "--gc-sections"]));
    assert!(matches!(
        index.product("Codegen"),
        Err(BuildError::NotFound { kind: "product", .. })
    ));
}

#[test]
fn test_index_is_per_platform() {
    for platform in TestPlatform::ALL {
        let params = create_for_platform(platform, BuildConfiguration::Release).unwrap();
        let index = BuildPlanIndex::build(&sample_plan(&params)).unwrap();

        let swift = index.swift_target("ToolCore").unwrap();
        let triple = platform.triple().to_string();
        assert!(
            swift.compile_arguments.contains(&triple),
            "{} missing from {:?}",
            triple,
            swift.compile_arguments
        );
        assert!(swift.compile_arguments.contains(&"-O".to_string()));
    }
}

#[test]
fn test_summary_lists_linkable_products() {
    let params = create_for_platform(TestPlatform::Windows, BuildConfiguration::Debug).unwrap();
    let index = BuildPlanIndex::build(&sample_plan(&params)).unwrap();

    let summary = index.summary();
    let names: Vec<_> = summary.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["tool", "toolPackageTests"]);
    assert!(summary.products[0].binary_path.ends_with("debug/tool.exe"));

    let json = summary.to_json().unwrap();
    assert!(json.contains("\"kind\": \"test-entry-point\""));
    assert!(!json.contains("Codegen"));
}

#[test]
fn test_unresolved_id_renders_diagnostic() {
    let params = create_for_platform(TestPlatform::MacOs, BuildConfiguration::Debug).unwrap();
    let mut plan = sample_plan(&params);
    let stray = Target::library("other", "Stray");
    plan.add_description(TargetId::new("other", "Stray"), TargetDescription::for_target(stray, &params));

    let err = BuildPlanIndex::build(&plan).unwrap_err();
    assert_eq!(err.to_string(), "target id `other::Stray` not found");

    let rendered = err.to_diagnostic().format(false);
    assert!(rendered.starts_with("error: target id `other::Stray` not found"));
    assert!(rendered.contains("help: consider:"));
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_options_from_toml() {
    let options = BuildParameterOptions::from_toml_str(
        r#"
configuration = "release"
target-triple = "x86_64-unknown-windows-msvc"
link-time-optimization-mode = "full"
"#,
    )
    .unwrap();
    let params = create(options).unwrap();

    assert_eq!(params.triple(), KnownTriple::Windows.triple());
    assert!(!params.is_debug());
    assert!(params.lint().is_empty());
}

#[test]
fn test_platform_names() {
    for name in ["macos", "linux", "android", "windows"] {
        let params = create_for_platform_name(name, BuildConfiguration::Debug).unwrap();
        assert!(params.is_debug());
    }

    let err = "haiku".parse::<TestPlatform>().unwrap_err();
    assert_eq!(
        err,
        BuildError::UnsupportedPlatform {
            platform: "haiku".to_string()
        }
    );
}

#[test]
#[should_panic(expected = "unsupported test platform `beos`")]
fn test_platform_name_panics_when_unsupported() {
    let _ = create_for_platform_name("beos", BuildConfiguration::Release);
}

#[test]
fn test_fingerprint_tracks_platform() {
    let linux = create_for_platform(TestPlatform::Linux, BuildConfiguration::Debug).unwrap();
    let android = create_for_platform(TestPlatform::Android, BuildConfiguration::Debug).unwrap();
    let linux_again = create_for_platform(TestPlatform::Linux, BuildConfiguration::Debug).unwrap();

    assert_ne!(linux.fingerprint(), android.fingerprint());
    assert_eq!(linux.fingerprint(), linux_again.fingerprint());
}
