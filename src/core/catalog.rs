//! Catalog of the platform triples in the test matrix.
//!
//! The set is closed: every triple a fixture can build for is named here.
//! The host triple is computed once per process.

use std::fmt;
use std::sync::{LazyLock, OnceLock};

use super::triple::PlatformTriple;

/// Minimum macOS deployment target appended to the host triple on macOS.
pub const MINIMUM_MACOS_DEPLOYMENT_TARGET: &str = "10.13";

/// A named triple from the test matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownTriple {
    /// x86_64-apple-macosx
    X86_64MacOs,
    /// x86_64-unknown-linux-gnu
    X86_64Linux,
    /// aarch64-unknown-linux-gnu
    Arm64Linux,
    /// aarch64-unknown-linux-android
    Arm64Android,
    /// x86_64-unknown-windows-msvc
    Windows,
    /// wasm32-unknown-wasi
    Wasi,
    /// arm64-apple-ios
    Arm64Ios,
}

static CATALOG: LazyLock<Vec<PlatformTriple>> = LazyLock::new(|| {
    KnownTriple::ALL
        .iter()
        .map(|known| {
            let (arch, vendor, os, env) = known.components();
            PlatformTriple::new(arch, vendor, os, env)
        })
        .collect()
});

impl KnownTriple {
    /// Every catalog entry, in declaration order.
    pub const ALL: [KnownTriple; 7] = [
        KnownTriple::X86_64MacOs,
        KnownTriple::X86_64Linux,
        KnownTriple::Arm64Linux,
        KnownTriple::Arm64Android,
        KnownTriple::Windows,
        KnownTriple::Wasi,
        KnownTriple::Arm64Ios,
    ];

    /// Short catalog name for this entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownTriple::X86_64MacOs => "x86_64-macos",
            KnownTriple::X86_64Linux => "x86_64-linux",
            KnownTriple::Arm64Linux => "arm64-linux",
            KnownTriple::Arm64Android => "arm64-android",
            KnownTriple::Windows => "windows",
            KnownTriple::Wasi => "wasi",
            KnownTriple::Arm64Ios => "arm64-ios",
        }
    }

    fn components(&self) -> (&'static str, &'static str, &'static str, Option<&'static str>) {
        match self {
            KnownTriple::X86_64MacOs => ("x86_64", "apple", "macosx", None),
            KnownTriple::X86_64Linux => ("x86_64", "unknown", "linux", Some("gnu")),
            KnownTriple::Arm64Linux => ("aarch64", "unknown", "linux", Some("gnu")),
            KnownTriple::Arm64Android => ("aarch64", "unknown", "linux", Some("android")),
            KnownTriple::Windows => ("x86_64", "unknown", "windows", Some("msvc")),
            KnownTriple::Wasi => ("wasm32", "unknown", "wasi", None),
            KnownTriple::Arm64Ios => ("arm64", "apple", "ios", None),
        }
    }

    /// The triple for this entry.
    pub fn triple(&self) -> &'static PlatformTriple {
        &CATALOG[*self as usize]
    }

    /// Look up an entry by its short catalog name.
    pub fn by_name(name: &str) -> Option<KnownTriple> {
        KnownTriple::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for KnownTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static HOST_TRIPLE: OnceLock<PlatformTriple> = OnceLock::new();

/// The triple of the machine running this process.
///
/// Computed on first use and shared afterwards. On macOS the OS component
/// carries [`MINIMUM_MACOS_DEPLOYMENT_TARGET`].
pub fn host_triple() -> &'static PlatformTriple {
    HOST_TRIPLE.get_or_init(|| {
        let triple = host_triple_for(std::env::consts::ARCH, std::env::consts::OS);
        tracing::debug!("Resolved host triple {}", triple);
        triple
    })
}

/// Compute the host triple for a Rust `(arch, os)` pair.
pub fn host_triple_for(arch: &str, os: &str) -> PlatformTriple {
    match os {
        "macos" => {
            // Apple spells aarch64 as arm64
            let arch = if arch == "aarch64" { "arm64" } else { arch };
            PlatformTriple::new(arch, "apple", "macosx", None)
                .with_os_version(MINIMUM_MACOS_DEPLOYMENT_TARGET)
        }
        "linux" => PlatformTriple::new(arch, "unknown", "linux", Some("gnu")),
        "android" => PlatformTriple::new(arch, "unknown", "linux", Some("android")),
        "windows" => PlatformTriple::new(arch, "unknown", "windows", Some("msvc")),
        other => PlatformTriple::new(arch, "unknown", other, None),
    }
}
