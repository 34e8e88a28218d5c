//! Generated project layout and the files botango owns in it
//!
//! This module provides:
//! - ProjectLayout, the paths of a generated project
//! - The TOML project manifest store
//! - requirements.txt generation
//! - ProjectBuilder, which runs the whole generation pipeline

pub mod builder;
pub mod manifest;
pub mod requirements;

pub use builder::{BuildReport, ProjectBuilder};
pub use manifest::{ManifestData, ModelEntry, ProjectManifest};
pub use requirements::{render_requirements, write_requirements};

use std::path::{Path, PathBuf};

/// Components `newbot` selects when the user does not choose
pub const DEFAULT_SELECTION: &[&str] = &[
    "base",
    "handlers",
    "keyboards",
    "middlewares",
    "services",
    "polling",
    "database",
    "aiosqlite",
    "migrations",
];

const DEFAULT_PROJECT_NAME: &str = "bot";

/// Paths of a generated project, all relative to its root directory
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    name: Option<String>,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            name: None,
        }
    }

    /// Override the project name instead of deriving it from the directory
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project name, derived from the directory name unless overridden
    pub fn project_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(&self.root)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
    }

    pub fn env_path(&self) -> PathBuf {
        self.root.join("data").join(".env")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("botango.toml")
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.root.join("requirements.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentRegistry;

    #[test]
    fn test_default_selection_is_valid() {
        let registry = ComponentRegistry::botango().unwrap();
        assert!(registry.validate_selection(DEFAULT_SELECTION).is_empty());
    }

    #[test]
    fn test_layout_paths() {
        let layout = ProjectLayout::new("/srv/shop_bot");
        assert_eq!(layout.project_name(), "shop_bot");
        assert_eq!(layout.env_path(), PathBuf::from("/srv/shop_bot/data/.env"));
        assert_eq!(layout.manifest_path(), PathBuf::from("/srv/shop_bot/botango.toml"));
    }

    #[test]
    fn test_explicit_name_wins() {
        let layout = ProjectLayout::new("/srv/shop_bot").with_name("Shop Assistant");
        assert_eq!(layout.project_name(), "Shop Assistant");
    }

    #[test]
    fn test_project_name_falls_back_for_root() {
        assert_eq!(ProjectLayout::new("/").project_name(), "bot");
    }
}
