//! Template pack manifest types and parsing

use serde::{Deserialize, Serialize};

/// A file rendered into the generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Template path relative to the owning template directory
    pub source: String,

    /// Destination path in the project (defaults to source if not specified)
    #[serde(default)]
    pub dest: Option<String>,
}

impl TemplateFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Root pack manifest (templates/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackManifest {
    /// Semver version of the pack, compared against the CLI version
    pub version: String,

    /// Files from the pack root rendered into every project
    #[serde(default)]
    pub shared_files: Vec<TemplateFile>,
}

/// Per-component manifest (templates/<component dir>/template.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentTemplates {
    #[serde(default)]
    pub files: Vec<TemplateFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_falls_back_to_source() {
        let file = TemplateFile {
            source: "main.py".to_string(),
            dest: None,
        };
        assert_eq!(file.destination(), "main.py");
    }

    #[test]
    fn test_parse_component_templates() {
        let yaml = "files:\n  - source: main.py\n    dest: bot/main.py\n  - source: settings.py\n";
        let parsed: ComponentTemplates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.files[0].destination(), "bot/main.py");
        assert_eq!(parsed.files[1].destination(), "settings.py");
    }

    #[test]
    fn test_parse_pack_manifest_without_shared_files() {
        let parsed: PackManifest = serde_yaml::from_str("version: 0.1.0\n").unwrap();
        assert_eq!(parsed.version, "0.1.0");
        assert!(parsed.shared_files.is_empty());
    }
}
