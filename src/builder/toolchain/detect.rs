//! Host platform detection.
//!
//! Detection reads compile-time constants only; no compiler is probed.

use std::fmt;

/// Operating system family of the host running the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    MacOs,
    Linux,
    Windows,
    /// Any other host (BSDs, wasm, ...)
    Other,
}

impl HostOs {
    /// Detect the current host family.
    pub fn current() -> Self {
        Self::from_rust_os(std::env::consts::OS)
    }

    /// Map a Rust `target_os` value to a host family.
    pub fn from_rust_os(os: &str) -> Self {
        match os {
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            "windows" => HostOs::Windows,
            _ => HostOs::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::MacOs => "macos",
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
            HostOs::Other => "other",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the host's C compiler is Apple's clang.
///
/// `None` when the host family gives no answer.
pub fn clang_vendor_is_apple(host: HostOs) -> Option<bool> {
    match host {
        HostOs::MacOs => Some(true),
        HostOs::Linux | HostOs::Windows => Some(false),
        HostOs::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rust_os() {
        assert_eq!(HostOs::from_rust_os("macos"), HostOs::MacOs);
        assert_eq!(HostOs::from_rust_os("linux"), HostOs::Linux);
        assert_eq!(HostOs::from_rust_os("windows"), HostOs::Windows);
        assert_eq!(HostOs::from_rust_os("freebsd"), HostOs::Other);
    }

    #[test]
    fn test_display() {
        assert_eq!(HostOs::MacOs.to_string(), "macos");
        assert_eq!(HostOs::from_rust_os("netbsd").to_string(), "other");
    }

    #[test]
    fn test_clang_vendor() {
        assert_eq!(clang_vendor_is_apple(HostOs::MacOs), Some(true));
        assert_eq!(clang_vendor_is_apple(HostOs::Linux), Some(false));
        assert_eq!(clang_vendor_is_apple(HostOs::Windows), Some(false));
        assert_eq!(clang_vendor_is_apple(HostOs::Other), None);
    }
}
