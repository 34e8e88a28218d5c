//! Template pack location and manifest loading
//!
//! A pack is a root `template.yaml` plus one directory per component,
//! each holding its own `template.yaml` and template files. It is read
//! either from a directory on disk or from the copy compiled into botango.

use super::bundled;
use super::manifest::{ComponentTemplates, PackManifest};
use super::render::{substitute, Renderer, TemplateVars};
use crate::components::{Component, ComponentRegistry};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "BOTANGO_TEMPLATE_DIR";

const MANIFEST_FILE: &str = "template.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PackSource {
    Dir(PathBuf),
    Bundled,
}

/// A template pack, on disk or bundled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePack {
    source: PackSource,
}

impl TemplatePack {
    /// Pack read from a local directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            source: PackSource::Dir(root.into()),
        }
    }

    /// Pack compiled into the binary
    pub fn bundled() -> Self {
        Self {
            source: PackSource::Bundled,
        }
    }

    /// Resolve the pack: explicit path, then `BOTANGO_TEMPLATE_DIR`, then
    /// the bundled templates.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let root = explicit.or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from));
        let pack = match root {
            Some(root) => Self::new(root),
            None => Self::bundled(),
        };
        tracing::debug!(pack = %pack, "template pack located");
        pack
    }

    /// Directory the pack is read from; `None` for the bundled pack
    pub fn root(&self) -> Option<&Path> {
        match &self.source {
            PackSource::Dir(root) => Some(root.as_path()),
            PackSource::Bundled => None,
        }
    }

    /// Read a pack file synchronously
    fn read(&self, rel: &str) -> Result<String> {
        match &self.source {
            PackSource::Dir(root) => {
                let path = root.join(rel);
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Template not found: {}", path.display()))
            }
            PackSource::Bundled => bundled::get(rel)
                .map(str::to_string)
                .with_context(|| format!("Template not found in bundled pack: {}", rel)),
        }
    }

    async fn load(&self, rel: &str) -> Result<String> {
        match &self.source {
            PackSource::Dir(root) => {
                let path = root.join(rel);
                fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
            PackSource::Bundled => self.read(rel),
        }
    }

    /// Load the root manifest
    pub async fn root_manifest(&self) -> Result<PackManifest> {
        let content = self.load(MANIFEST_FILE).await?;
        serde_yaml::from_str(&content).context("Failed to parse root template manifest")
    }

    /// Load the manifest listing a component's template files
    pub async fn component_templates(&self, component: &Component) -> Result<ComponentTemplates> {
        let content = self
            .load(&format!("{}/{}", component.templates, MANIFEST_FILE))
            .await?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse '{}' template manifest", component.name))
    }

    /// Template directories holding a `template.yaml`, as `/`-joined ids
    fn template_dirs(&self) -> HashSet<String> {
        match &self.source {
            PackSource::Dir(root) => WalkDir::new(root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE)
                .filter_map(|entry| {
                    let dir = entry.path().parent()?.strip_prefix(root).ok()?;
                    Some(
                        dir.components()
                            .map(|c| c.as_os_str().to_string_lossy().into_owned())
                            .collect::<Vec<_>>()
                            .join("/"),
                    )
                })
                .collect(),
            PackSource::Bundled => bundled::FILES
                .iter()
                .filter_map(|(path, _)| path.strip_suffix(MANIFEST_FILE))
                .map(|dir| dir.trim_end_matches('/').to_string())
                .collect(),
        }
    }

    /// Names of catalog components with no template directory in the pack
    pub fn missing_components(&self, registry: &ComponentRegistry) -> Vec<String> {
        let available = self.template_dirs();
        registry
            .all_components()
            .filter(|c| !available.contains(c.templates.as_str()))
            .map(|c| c.name.clone())
            .collect()
    }
}

impl fmt::Display for TemplatePack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PackSource::Dir(root) => write!(f, "{}", root.display()),
            PackSource::Bundled => f.write_str("bundled templates"),
        }
    }
}

impl Renderer for TemplatePack {
    fn render(&self, template_id: &str, vars: &TemplateVars) -> Result<String> {
        let text = self
            .read(template_id)
            .inspect_err(|e| tracing::error!(error = %e, "template read failed"))?;
        substitute(&text, vars)
            .with_context(|| format!("Failed to render template {}", template_id))
            .inspect_err(|e| tracing::error!(error = %e, "template render failed"))
    }
}
