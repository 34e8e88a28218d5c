//! Project manifest (`botango.toml`)
//!
//! Maps a model name to an ordered list of string tags:
//!
//! ```toml
//! [bot]
//! class = ["base", "handlers"]
//! ```

use crate::atomic::write_atomic;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Tags recorded for one model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    #[serde(default)]
    pub class: Vec<String>,
}

impl ModelEntry {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: values.into_iter().map(Into::into).collect(),
        }
    }
}

pub type ManifestData = BTreeMap<String, ModelEntry>;

/// File-backed manifest store
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    path: PathBuf,
}

impl ProjectManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole file
    pub fn write(&self, data: &ManifestData) -> Result<()> {
        let content = toml::to_string(data).context("Failed to serialize project manifest")?;
        write_atomic(&self.path, &content)
            .inspect_err(|e| tracing::error!(error = %e, "manifest write failed"))
    }

    /// Read the file; a missing file is an empty manifest
    pub fn read(&self) -> Result<ManifestData> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "manifest not found, using empty");
            return Ok(ManifestData::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
            .inspect_err(|e| tracing::error!(error = %e, "manifest unreadable"))?;

        Ok(table
            .into_iter()
            .map(|(name, value)| (name, normalize(value)))
            .collect())
    }

    /// Merge `data` into the stored manifest. Entries in `data` replace
    /// same-named entries wholesale; other stored entries are kept.
    pub fn rewrite(&self, data: &ManifestData) -> Result<()> {
        let mut merged = self.read()?;
        for (name, entry) in data {
            merged.insert(name.clone(), entry.clone());
        }
        self.write(&merged)
    }

    /// Add an empty model; existing models are left alone
    pub fn add_model(&self, name: &str) -> Result<()> {
        let mut data = self.read()?;
        if data.contains_key(name) {
            tracing::info!(model = name, "model already exists");
            return Ok(());
        }
        data.insert(name.to_string(), ModelEntry::default());
        self.write(&data)?;
        tracing::info!(model = name, "model added");
        Ok(())
    }

    /// Append a tag to a model, creating the model if needed
    pub fn add_value(&self, model: &str, value: &str) -> Result<()> {
        let mut data = self.read()?;
        let entry = data.entry(model.to_string()).or_default();
        if entry.class.iter().any(|v| v == value) {
            tracing::info!(model, value, "value already present");
            return Ok(());
        }
        entry.class.push(value.to_string());
        self.write(&data)?;
        tracing::info!(model, value, "value added");
        Ok(())
    }

    pub fn delete_model(&self, name: &str) -> Result<()> {
        let mut data = self.read()?;
        if data.remove(name).is_none() {
            tracing::info!(model = name, "model not found");
            return Ok(());
        }
        self.write(&data)?;
        tracing::info!(model = name, "model deleted");
        Ok(())
    }

    /// Remove a tag; the model stays even when its list becomes empty
    pub fn delete_value(&self, model: &str, value: &str) -> Result<()> {
        let mut data = self.read()?;
        let Some(entry) = data.get_mut(model) else {
            tracing::info!(model, "model not found");
            return Ok(());
        };
        let before = entry.class.len();
        entry.class.retain(|v| v != value);
        if entry.class.len() == before {
            tracing::info!(model, value, "value not found");
            return Ok(());
        }
        self.write(&data)?;
        tracing::info!(model, value, "value deleted");
        Ok(())
    }
}

/// Coerce loosely written entries into `{ class = [...] }`
fn normalize(value: toml::Value) -> ModelEntry {
    match value {
        toml::Value::Table(mut table) => match table.remove("class") {
            Some(toml::Value::Array(values)) => ModelEntry::new(values.into_iter().map(scalar)),
            Some(other) => ModelEntry::new([scalar(other)]),
            None => ModelEntry::default(),
        },
        other => ModelEntry::new([scalar(other)]),
    }
}

fn scalar(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manifest_in(dir: &Path) -> ProjectManifest {
        ProjectManifest::new(dir.join("botango.toml"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        assert!(manifest_in(dir.path()).read().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let mut data = ManifestData::new();
        data.insert("bot".to_string(), ModelEntry::new(["base", "handlers"]));

        manifest.write(&data).unwrap();

        assert_eq!(manifest.read().unwrap(), data);
    }

    #[test]
    fn test_read_normalizes_loose_entries() {
        let dir = tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        std::fs::write(
            manifest.path(),
            "version = 3\n[user]\nclass = \"Admin\"\n[order]\nclass = [1, \"two\"]\n",
        )
        .unwrap();

        let data = manifest.read().unwrap();

        assert_eq!(data["version"].class, vec!["3"]);
        assert_eq!(data["user"].class, vec!["Admin"]);
        assert_eq!(data["order"].class, vec!["1", "two"]);
    }

    #[test]
    fn test_rewrite_is_last_write_wins_per_model() {
        let dir = tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let mut existing = ManifestData::new();
        existing.insert("bot".to_string(), ModelEntry::new(["base", "docker"]));
        existing.insert("user".to_string(), ModelEntry::new(["Admin"]));
        manifest.write(&existing).unwrap();

        let mut update = ManifestData::new();
        update.insert("bot".to_string(), ModelEntry::new(["base"]));
        manifest.rewrite(&update).unwrap();

        let data = manifest.read().unwrap();
        assert_eq!(data["bot"].class, vec!["base"]);
        assert_eq!(data["user"].class, vec!["Admin"]);
    }

    #[test]
    fn test_add_and_delete_values() {
        let dir = tempdir().unwrap();
        let manifest = manifest_in(dir.path());

        manifest.add_model("user").unwrap();
        manifest.add_value("user", "Admin").unwrap();
        manifest.add_value("user", "Admin").unwrap();
        manifest.add_value("order", "Pending").unwrap();
        manifest.delete_value("user", "Admin").unwrap();

        let data = manifest.read().unwrap();
        assert!(data["user"].class.is_empty());
        assert_eq!(data["order"].class, vec!["Pending"]);

        manifest.delete_model("order").unwrap();
        manifest.delete_model("missing").unwrap();
        assert!(!manifest.read().unwrap().contains_key("order"));
    }
}
