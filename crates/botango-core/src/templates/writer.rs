//! Rendering a resolved selection into project files

use super::pack::TemplatePack;
use super::render::{Renderer, TemplateVars};
use crate::components::ResolvedSelection;
use anyhow::{Context, Result};
use std::path::{Component, Path};
use tokio::fs;

/// Variables every template can use
pub fn project_vars(project_name: &str, selection: &ResolvedSelection<'_>) -> TemplateVars {
    let database = selection.database();
    let framework = selection.web_framework();

    let mut vars = TemplateVars::new();
    vars.insert("project_name".to_string(), project_name.to_string());
    vars.insert("components".to_string(), selection.names().join(", "));
    vars.insert(
        "requirements".to_string(),
        selection.requirement_strings().join("\n"),
    );
    vars.insert(
        "database".to_string(),
        database.map(|c| c.name.clone()).unwrap_or_default(),
    );
    vars.insert(
        "db_type".to_string(),
        database
            .and_then(|c| c.kind.db_type())
            .unwrap_or_default()
            .to_string(),
    );
    vars.insert(
        "volume_path".to_string(),
        database
            .and_then(|c| c.kind.volume_path())
            .unwrap_or_default()
            .to_string(),
    );
    vars.insert(
        "framework_type".to_string(),
        framework
            .and_then(|c| c.kind.framework_type())
            .unwrap_or_default()
            .to_string(),
    );
    vars
}

/// Render the pack's shared files and every selected component's files
/// into `target_dir`. Components are written in catalog order, so a later
/// component can override a file from an earlier one.
///
/// Returns the destination paths written, relative to `target_dir`.
pub async fn write_project<R: Renderer>(
    pack: &TemplatePack,
    renderer: &R,
    selection: &ResolvedSelection<'_>,
    vars: &TemplateVars,
    target_dir: &Path,
) -> Result<Vec<String>> {
    let root_manifest = pack.root_manifest().await?;
    let mut jobs: Vec<(String, String)> = Vec::new();
    for file in &root_manifest.shared_files {
        check_destination("shared files", file.destination())?;
        jobs.push((file.source.clone(), file.destination().to_string()));
    }

    for component in selection.components() {
        let templates = pack.component_templates(component).await?;
        for file in &templates.files {
            check_destination(&component.name, file.destination())?;
            jobs.push((
                format!("{}/{}", component.templates, file.source),
                file.destination().to_string(),
            ));
        }
    }

    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::new();
    for (template_id, dest) in jobs {
        let content = renderer.render(&template_id, vars)?;

        // Ensure parent directories exist
        let target_path = target_dir.join(&dest);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))
            .inspect_err(|e| tracing::error!(error = %e, "project file write failed"))?;
        tracing::debug!(template = %template_id, dest = %dest, "rendered");

        if !written.contains(&dest) {
            written.push(dest);
        }
    }

    Ok(written)
}

/// Reject destinations that would land outside the project directory
fn check_destination(owner: &str, dest: &str) -> Result<()> {
    let path = Path::new(dest);
    let inside = !dest.is_empty()
        && !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !inside {
        anyhow::bail!(
            "template '{}' has destination '{}' outside the project directory",
            owner,
            dest
        );
    }
    Ok(())
}
