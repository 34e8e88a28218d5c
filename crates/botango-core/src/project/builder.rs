//! End-to-end project generation for a component selection

use super::manifest::{ManifestData, ModelEntry, ProjectManifest};
use super::requirements::write_requirements;
use super::ProjectLayout;
use crate::components::ComponentRegistry;
use crate::env::{EnvBlock, EnvStore, EnvStoreConfig};
use crate::templates::{check_compatibility, project_vars, write_project, Renderer, TemplatePack};
use anyhow::Result;

/// What a build produced
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Selected component names, in catalog order
    pub components: Vec<String>,
    /// Rendered files, relative to the project root
    pub files: Vec<String>,
    pub env_blocks: Vec<EnvBlock>,
    pub requirements: Vec<String>,
    /// Non-fatal problems worth showing the user
    pub warnings: Vec<String>,
}

/// Generates a bot project from a selection of component names
pub struct ProjectBuilder<'a, R: Renderer> {
    registry: &'a ComponentRegistry,
    pack: TemplatePack,
    renderer: R,
    layout: ProjectLayout,
    cli_version: String,
}

impl<'a, R: Renderer> ProjectBuilder<'a, R> {
    pub fn new(
        registry: &'a ComponentRegistry,
        pack: TemplatePack,
        renderer: R,
        layout: ProjectLayout,
        cli_version: &str,
    ) -> Self {
        Self {
            registry,
            pack,
            renderer,
            layout,
            cli_version: cli_version.to_string(),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Validate the selection, then write the `.env`, the project
    /// manifest, the rendered templates and `requirements.txt`.
    ///
    /// An invalid selection fails before anything is written.
    pub async fn build<S: AsRef<str>>(&self, names: &[S]) -> Result<BuildReport> {
        let selection = self.registry.resolve(names)?;
        let mut report = BuildReport {
            components: selection.names().into_iter().map(String::from).collect(),
            ..BuildReport::default()
        };
        tracing::info!(components = ?report.components, "selection resolved");

        let pack_manifest = self.pack.root_manifest().await?;
        if let Some(warning) = check_compatibility(&self.cli_version, &pack_manifest.version) {
            tracing::warn!(%warning, "template pack version mismatch");
            report.warnings.push(warning);
        }

        // env setup
        let env = EnvStore::new(EnvStoreConfig::new(self.layout.env_path()));
        report.env_blocks = EnvBlock::for_selection(&selection);
        env.apply(&report.env_blocks)?;

        // manifest rewrite
        let requirements = selection.requirement_strings();
        let mut models = ManifestData::new();
        models.insert("bot".to_string(), ModelEntry::new(report.components.clone()));
        models.insert("requirements".to_string(), ModelEntry::new(requirements));
        ProjectManifest::new(self.layout.manifest_path()).rewrite(&models)?;

        // project files
        let vars = project_vars(&self.layout.project_name(), &selection);
        report.files = write_project(
            &self.pack,
            &self.renderer,
            &selection,
            &vars,
            self.layout.root(),
        )
        .await?;

        report.requirements = write_requirements(&self.layout.requirements_path(), &selection)?;
        tracing::info!(
            root = %self.layout.root().display(),
            files = report.files.len(),
            "project generated"
        );

        Ok(report)
    }
}
