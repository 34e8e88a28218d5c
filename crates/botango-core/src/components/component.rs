//! Selectable project components

use super::dependency::Dependency;
use serde::Serialize;
use std::collections::HashSet;

/// Variant-specific data. None of it takes part in selection validation;
/// it only feeds the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    Plain,
    Docker,
    Database {
        db_type: String,
        async_support: bool,
    },
    WebFramework {
        framework_type: String,
    },
    DockerDatabase {
        db_type: String,
        async_support: bool,
        volume_path: String,
    },
}

impl ComponentKind {
    pub fn database(db_type: &str) -> Self {
        ComponentKind::Database {
            db_type: db_type.to_string(),
            async_support: true,
        }
    }

    pub fn sync_database(db_type: &str) -> Self {
        ComponentKind::Database {
            db_type: db_type.to_string(),
            async_support: false,
        }
    }

    pub fn web_framework(framework_type: &str) -> Self {
        ComponentKind::WebFramework {
            framework_type: framework_type.to_string(),
        }
    }

    pub fn docker_database(db_type: &str, volume_path: &str) -> Self {
        ComponentKind::DockerDatabase {
            db_type: db_type.to_string(),
            async_support: true,
            volume_path: volume_path.to_string(),
        }
    }

    /// Database engine name for plain and docker database components
    pub fn db_type(&self) -> Option<&str> {
        match self {
            ComponentKind::Database { db_type, .. }
            | ComponentKind::DockerDatabase { db_type, .. } => Some(db_type),
            _ => None,
        }
    }

    pub fn framework_type(&self) -> Option<&str> {
        match self {
            ComponentKind::WebFramework { framework_type } => Some(framework_type),
            _ => None,
        }
    }

    pub fn volume_path(&self) -> Option<&str> {
        match self {
            ComponentKind::DockerDatabase { volume_path, .. } => Some(volume_path),
            _ => None,
        }
    }

    pub fn is_database(&self) -> bool {
        self.db_type().is_some()
    }
}

/// A named unit of generated project functionality
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Template directory, relative to the template root
    pub templates: String,
    pub dependencies: Vec<Dependency>,
    /// Components that must also be selected
    pub requires: Vec<String>,
    /// Components that must not be selected alongside this one
    pub conflicts_with: Vec<String>,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(name: &str, description: &str, templates: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            templates: templates.to_string(),
            dependencies: Vec::new(),
            requires: Vec::new(),
            conflicts_with: Vec::new(),
            kind: ComponentKind::Plain,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn requires(mut self, names: &[&str]) -> Self {
        self.requires.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn conflicts_with(mut self, names: &[&str]) -> Self {
        self.conflicts_with
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Declared dependencies, in declaration order
    pub fn declared_dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// `pack()` of each dependency, in declaration order, duplicates kept
    pub fn requirement_strings(&self) -> Vec<String> {
        self.dependencies.iter().map(Dependency::pack).collect()
    }

    /// Check this component against the complete candidate selection.
    pub fn is_compatible_with(&self, selected: &HashSet<&str>) -> bool {
        let conflicting = self
            .conflicts_with
            .iter()
            .any(|name| selected.contains(name.as_str()));
        let unmet = self
            .requires
            .iter()
            .any(|name| !selected.contains(name.as_str()));
        !conflicting && !unmet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection<'a>(names: &[&'a str]) -> HashSet<&'a str> {
        names.iter().copied().collect()
    }

    #[test]
    fn test_requirement_strings_keep_order_and_duplicates() {
        let component = Component::new("db", "", "db").dependencies([
            Dependency::new("sqlalchemy", "2.0.44"),
            Dependency::latest("aiosqlite"),
            Dependency::new("sqlalchemy", "2.0.44"),
        ]);
        assert_eq!(
            component.requirement_strings(),
            vec!["sqlalchemy>=2.0.44", "aiosqlite", "sqlalchemy>=2.0.44"]
        );
        assert_eq!(component.declared_dependencies().len(), 3);
    }

    #[test]
    fn test_compatible_when_requirements_met() {
        let keyboards = Component::new("keyboards", "", "keyboards").requires(&["base", "handlers"]);
        assert!(keyboards.is_compatible_with(&selection(&["handlers", "keyboards", "base"])));
    }

    #[test]
    fn test_incompatible_when_requirement_missing() {
        let keyboards = Component::new("keyboards", "", "keyboards").requires(&["base", "handlers"]);
        assert!(!keyboards.is_compatible_with(&selection(&["base", "keyboards"])));
    }

    #[test]
    fn test_incompatible_when_conflict_present() {
        let sync = Component::new("postgresql-sync", "", "pg")
            .conflicts_with(&["aiosqlite", "postgresql"]);
        assert!(!sync.is_compatible_with(&selection(&["postgresql", "postgresql-sync"])));
        assert!(sync.is_compatible_with(&selection(&["postgresql-sync"])));
    }

    #[test]
    fn test_kind_accessors() {
        let kind = ComponentKind::docker_database("sqlite", "./data:/app/data");
        assert_eq!(kind.db_type(), Some("sqlite"));
        assert_eq!(kind.volume_path(), Some("./data:/app/data"));
        assert_eq!(kind.framework_type(), None);
        assert!(kind.is_database());
        assert!(!ComponentKind::Docker.is_database());
    }
}
