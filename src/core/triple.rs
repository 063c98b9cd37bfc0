//! Platform triples.
//!
//! A triple names the platform a build produces code for, in the form
//! `<arch>-<vendor>-<os>[-<environment>]`. The OS component may carry a
//! version suffix (`macosx10.13`), which is kept verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::builder::errors::{BuildError, BuildResult};

/// OS component prefixes used by Apple platforms.
const DARWIN_OS_PREFIXES: &[&str] = &[
    "macosx", "macos", "darwin", "ios", "tvos", "watchos", "visionos",
];

/// Structured platform triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformTriple {
    /// CPU architecture (x86_64, aarch64, arm64, wasm32, ...)
    pub arch: String,
    /// Vendor (unknown, apple, pc, ...)
    pub vendor: String,
    /// Operating system, possibly versioned (linux, macosx10.13, windows, ...)
    pub os: String,
    /// Environment/ABI (gnu, android, msvc, ...)
    pub environment: Option<String>,
}

impl PlatformTriple {
    /// Create a new triple from its components.
    pub fn new(arch: &str, vendor: &str, os: &str, environment: Option<&str>) -> Self {
        PlatformTriple {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            os: os.to_string(),
            environment: environment.map(|s| s.to_string()),
        }
    }

    /// Parse a triple string.
    ///
    /// Three or four non-empty components are accepted; anything else is a
    /// [`BuildError::Parse`].
    pub fn parse(s: &str) -> BuildResult<Self> {
        if s.is_empty() {
            return Err(BuildError::parse(s, "triple is empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(BuildError::parse(s, "triple contains whitespace"));
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() < 3 {
            return Err(BuildError::parse(
                s,
                format!("expected at least 3 components, found {}", parts.len()),
            ));
        }
        if parts.len() > 4 {
            return Err(BuildError::parse(
                s,
                format!("expected at most 4 components, found {}", parts.len()),
            ));
        }
        if let Some(pos) = parts.iter().position(|p| p.is_empty()) {
            return Err(BuildError::parse(
                s,
                format!("component {} is empty", pos + 1),
            ));
        }

        Ok(PlatformTriple::new(
            parts[0],
            parts[1],
            parts[2],
            parts.get(3).copied(),
        ))
    }

    /// Render the canonical string form.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Return a copy whose OS component carries a version suffix.
    ///
    /// Any version already present on the OS component is replaced.
    pub fn with_os_version(&self, version: &str) -> Self {
        let mut triple = self.clone();
        triple.os = format!("{}{}", self.os_name(), version);
        triple
    }

    /// The OS component without any trailing version.
    pub fn os_name(&self) -> &str {
        let end = self
            .os
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.os.len());
        &self.os[..end]
    }

    /// The version suffix of the OS component, if any.
    pub fn os_version(&self) -> Option<&str> {
        let version = &self.os[self.os_name().len()..];
        (!version.is_empty()).then_some(version)
    }

    /// Check if this is any Apple platform.
    pub fn is_darwin(&self) -> bool {
        self.vendor == "apple" && DARWIN_OS_PREFIXES.contains(&self.os_name())
    }

    /// Check if this is macOS.
    pub fn is_macos(&self) -> bool {
        self.is_darwin() && matches!(self.os_name(), "macosx" | "macos" | "darwin")
    }

    /// Check if this is a Linux platform (including Android).
    pub fn is_linux(&self) -> bool {
        self.os_name() == "linux"
    }

    /// Check if this is Android.
    pub fn is_android(&self) -> bool {
        self.is_linux()
            && self
                .environment
                .as_deref()
                .is_some_and(|env| env.starts_with("android"))
    }

    /// Check if this is Windows.
    pub fn is_windows(&self) -> bool {
        self.os_name() == "windows"
    }

    /// Check if this is WebAssembly System Interface.
    pub fn is_wasi(&self) -> bool {
        self.os_name() == "wasi"
    }
}

impl fmt::Display for PlatformTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.environment {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}

impl FromStr for PlatformTriple {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformTriple::parse(s)
    }
}

impl Serialize for PlatformTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformTriple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PlatformTriple::parse(&s).map_err(serde::de::Error::custom)
    }
}
