//! TOML configuration for build parameter options.
//!
//! Options can be written as a TOML document whose keys mirror
//! [`BuildParameterOptions`] in kebab-case. Every key is optional:
//!
//! ```toml
//! configuration = "release"
//! target-triple = "aarch64-unknown-linux-gnu"
//! link-time-optimization-mode = "thin"
//! worker-count = 8
//!
//! [flags]
//! swift-compiler-flags = ["-enable-testing"]
//! ```
//!
//! Reading the document from disk is left to the caller. The toolchain is
//! never part of the document.

use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::parameters::BuildParameterOptions;

impl BuildParameterOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(contents: &str) -> BuildResult<Self> {
        toml::from_str(contents).map_err(|e| {
            BuildError::configuration(format!("failed to parse build options: {}", e.message()))
        })
    }

    /// Serialize options to a TOML document.
    pub fn to_toml_string(&self) -> BuildResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            BuildError::configuration(format!("failed to serialize build options: {}", e))
        })
    }
}
