//! Build configuration and plan indexing errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Result alias used throughout the build configuration layer.
pub type BuildResult<T> = Result<T, BuildError>;

/// Error raised while configuring a build or indexing a build plan.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum BuildError {
    #[error("invalid target triple `{input}`: {reason}")]
    #[diagnostic(code(harbour::triple::parse))]
    Parse { input: String, reason: String },

    #[error("inconsistent build parameters: {message}")]
    #[diagnostic(code(harbour::parameters::configuration))]
    Configuration { message: String },

    #[error("{kind} `{name}` not found")]
    #[diagnostic(code(harbour::plan::not_found))]
    NotFound { kind: &'static str, name: String },

    #[error("duplicate {kind} name `{name}`")]
    #[diagnostic(
        code(harbour::plan::duplicate_key),
        help("every {kind} in a build plan must have a unique name")
    )]
    DuplicateKey { kind: &'static str, name: String },

    #[error("target `{name}` is a {found} module, not a {expected} module")]
    #[diagnostic(code(harbour::plan::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unsupported test platform `{platform}`")]
    #[diagnostic(
        code(harbour::parameters::unsupported_platform),
        help("supported platforms: macos, linux, android, windows")
    )]
    UnsupportedPlatform { platform: String },

    #[error("expected {expected} {kind}s in build plan, found {found}")]
    #[diagnostic(code(harbour::plan::count_mismatch))]
    CountMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}

impl BuildError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        BuildError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        BuildError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        BuildError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BuildError::Parse { input, reason } => {
                Diagnostic::error(format!("invalid target triple `{}`", input))
                    .with_context(reason.clone())
                    .with_suggestion(suggestions::TRIPLE_FORMAT)
            }

            BuildError::Configuration { message } => {
                Diagnostic::error("inconsistent build parameters").with_context(message.clone())
            }

            BuildError::NotFound { kind, name } => {
                let diag = Diagnostic::error(format!("{} `{}` not found", kind, name));
                match *kind {
                    "product" => diag.with_suggestion(suggestions::PRODUCT_NOT_FOUND),
                    _ => diag.with_suggestion(suggestions::TARGET_NOT_FOUND),
                }
            }

            BuildError::DuplicateKey { kind, name } => {
                Diagnostic::error(format!("duplicate {} name `{}`", kind, name))
                    .with_context(format!(
                        "more than one {} in the build plan is named `{}`",
                        kind, name
                    ))
                    .with_suggestion(format!("Rename one of the `{}` {}s", name, kind))
            }

            BuildError::TypeMismatch {
                name,
                expected,
                found,
            } => Diagnostic::error(format!("unexpected module type for `{}`", name))
                .with_context(format!("expected a {} module, found a {} module", expected, found)),

            BuildError::UnsupportedPlatform { platform } => {
                Diagnostic::error(format!("unsupported test platform `{}`", platform))
                    .with_suggestion(suggestions::SUPPORTED_PLATFORMS)
            }

            BuildError::CountMismatch {
                kind,
                expected,
                found,
            } => Diagnostic::error(format!("unexpected number of {}s", kind))
                .with_context(format!("expected {}, found {}", expected, found)),
        }
    }
}
