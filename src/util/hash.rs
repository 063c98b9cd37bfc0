//! Hashing utilities for fingerprinting.

use std::path::Path;

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0"); // Separator
        self
    }

    /// Add multiple strings as one length-prefixed component.
    pub fn update_strs<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) -> &mut Self {
        let items: Vec<&str> = items.into_iter().collect();
        self.hasher.update((items.len() as u64).to_le_bytes());
        for s in items {
            self.update_str(s);
        }
        self
    }

    /// Add an optional string component.
    pub fn update_opt(&mut self, opt: Option<&str>) -> &mut Self {
        match opt {
            Some(s) => {
                self.hasher.update(b"\x01"); // Present marker
                self.update_str(s);
            }
            None => {
                self.hasher.update(b"\x00"); // Absent marker
            }
        }
        self
    }

    /// Add a path component.
    pub fn update_path(&mut self, path: &Path) -> &mut Self {
        self.update_str(&path.to_string_lossy())
    }

    /// Add a boolean component.
    pub fn update_bool(&mut self, b: bool) -> &mut Self {
        self.hasher.update([b as u8]);
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(&mut self) -> String {
        hex::encode(std::mem::take(&mut self.hasher).finalize())
    }

    /// Finalize and return a short fingerprint (first 16 chars).
    pub fn finish_short(&mut self) -> String {
        self.finish()[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_hex_digest() {
        let digest = Fingerprint::new().finish();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(Fingerprint::new().finish_short().len(), 16);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let mut fp1 = Fingerprint::new();
        fp1.update_str("x86_64-unknown-linux-gnu").update_bool(true);

        let mut fp2 = Fingerprint::new();
        fp2.update_str("x86_64-unknown-linux-gnu").update_bool(true);

        assert_eq!(fp1.finish(), fp2.finish());
    }

    #[test]
    fn test_fingerprint_list_boundaries() {
        let mut fp1 = Fingerprint::new();
        fp1.update_strs(["-O2", "-g"]).update_strs([]);

        let mut fp2 = Fingerprint::new();
        fp2.update_strs(["-O2"]).update_strs(["-g"]);

        assert_ne!(fp1.finish(), fp2.finish());
    }

    #[test]
    fn test_fingerprint_optional_marker() {
        let mut absent = Fingerprint::new();
        absent.update_opt(None);

        let mut empty = Fingerprint::new();
        empty.update_opt(Some(""));

        assert_ne!(absent.finish_short(), empty.finish_short());
    }
}
