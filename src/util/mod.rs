//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod hash;

pub use diagnostic::Diagnostic;
pub use hash::Fingerprint;
