//! Python package requirements declared by components

use serde::Serialize;
use std::fmt;

/// Comparison operator placed between a package name and its version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum VersionSeparator {
    #[serde(rename = "==")]
    Exact,
    #[default]
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "~=")]
    Compatible,
}

impl VersionSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSeparator::Exact => "==",
            VersionSeparator::GreaterEqual => ">=",
            VersionSeparator::Greater => ">",
            VersionSeparator::LessEqual => "<=",
            VersionSeparator::Less => "<",
            VersionSeparator::Compatible => "~=",
        }
    }
}

impl fmt::Display for VersionSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single package requirement, e.g. `aiogram>=3.8.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version: Option<String>,
    pub separator: VersionSeparator,
    pub optional: bool,
}

impl Dependency {
    /// Requirement with a minimum version (`>=`)
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            separator: VersionSeparator::default(),
            optional: false,
        }
    }

    /// Requirement pinned to an exact version (`==`)
    pub fn exact(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            separator: VersionSeparator::Exact,
            ..Self::new(name, version)
        }
    }

    /// Unversioned requirement, resolved to whatever pip picks
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            separator: VersionSeparator::default(),
            optional: false,
        }
    }

    pub fn with_separator(mut self, separator: VersionSeparator) -> Self {
        self.separator = separator;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Render as a requirements.txt line. The separator is only emitted
    /// alongside a non-empty version.
    pub fn pack(&self) -> String {
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => {
                format!("{}{}{}", self.name, self.separator, version)
            }
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_with_version() {
        let dep = Dependency::new("aiogram", "3.8.0");
        assert_eq!(dep.pack(), "aiogram>=3.8.0");
    }

    #[test]
    fn test_pack_without_version_omits_separator() {
        let dep = Dependency::latest("uvicorn").with_separator(VersionSeparator::Exact);
        assert_eq!(dep.pack(), "uvicorn");
    }

    #[test]
    fn test_pack_with_empty_version_omits_separator() {
        let dep = Dependency::new("redis", "");
        assert_eq!(dep.pack(), "redis");
        assert!(!dep.pack().contains(">="));
    }

    #[test]
    fn test_exact_forces_double_equals() {
        let dep = Dependency::exact("psycopg2-binary", "2.9.11");
        assert_eq!(dep.separator, VersionSeparator::Exact);
        assert_eq!(dep.pack(), "psycopg2-binary==2.9.11");
    }

    #[test]
    fn test_latest_has_no_version() {
        let dep = Dependency::latest("python-dotenv");
        assert!(dep.version.is_none());
        assert_eq!(dep.separator, VersionSeparator::GreaterEqual);
    }

    #[test]
    fn test_separator_present_iff_version_present() {
        let separators = [
            VersionSeparator::Exact,
            VersionSeparator::GreaterEqual,
            VersionSeparator::Greater,
            VersionSeparator::LessEqual,
            VersionSeparator::Less,
            VersionSeparator::Compatible,
        ];
        for sep in separators {
            let versioned = Dependency::new("pkg", "1.0").with_separator(sep);
            let bare = Dependency::latest("pkg").with_separator(sep);
            assert!(versioned.pack().contains(sep.as_str()));
            assert!(!bare.pack().contains(sep.as_str()));
        }
    }

    #[test]
    fn test_compatible_release() {
        let dep = Dependency::new("sqlalchemy", "2.0").with_separator(VersionSeparator::Compatible);
        assert_eq!(dep.to_string(), "sqlalchemy~=2.0");
    }
}
