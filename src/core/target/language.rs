//! Source languages and module families.

use serde::{Deserialize, Serialize};

/// Source language for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Swift (default)
    #[default]
    Swift,
    /// C language
    C,
    /// C++ language
    #[serde(alias = "cpp", alias = "c++")]
    Cxx,
    /// Objective-C
    #[serde(alias = "objective-c")]
    ObjC,
}

impl Language {
    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::C => "c",
            Language::Cxx => "c++",
            Language::ObjC => "objc",
        }
    }

    /// The module family that compiles this language.
    pub fn family(&self) -> ModuleFamily {
        match self {
            Language::Swift => ModuleFamily::Swift,
            Language::C | Language::Cxx | Language::ObjC => ModuleFamily::Clang,
        }
    }
}

/// Compiler family a module is built with.
///
/// Swift modules produce a compiled module interface; Clang modules are
/// native C-family sources exposed through headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFamily {
    Swift,
    Clang,
}

impl ModuleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFamily::Swift => "swift",
            ModuleFamily::Clang => "clang",
        }
    }
}

impl std::fmt::Display for ModuleFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
