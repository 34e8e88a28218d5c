//! Selection diagnostics and resolved selections

use super::component::{Component, ComponentKind};
use std::collections::HashSet;
use thiserror::Error;

/// One reason a component selection cannot be generated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Violation {
    #[error("component '{0}' not found")]
    NotFound(String),

    #[error("component '{0}' incompatible with current selection")]
    Incompatible(String),

    #[error("required component '{0}' not selected")]
    MissingRequired(String),

    #[error("docker requires a docker-flavored database component")]
    DockerDatabase,
}

/// A rejected selection, carrying every violation found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid component selection: {}", render_violations(.violations))]
pub struct SelectionError {
    pub violations: Vec<Violation>,
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A validated selection, holding its components in catalog order
#[derive(Debug, Clone)]
pub struct ResolvedSelection<'a> {
    components: Vec<&'a Component>,
}

impl<'a> ResolvedSelection<'a> {
    pub(crate) fn new(components: Vec<&'a Component>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[&'a Component] {
        &self.components
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.iter().any(|c| c.name == name)
    }

    /// Requirement lines for the whole project. Components contribute in
    /// catalog order; a line already emitted by an earlier component is
    /// skipped.
    pub fn requirement_strings(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.components
            .iter()
            .flat_map(|c| c.requirement_strings())
            .filter(|line| seen.insert(line.clone()))
            .collect()
    }

    /// The chosen database driver, plain or docker-flavored
    pub fn database(&self) -> Option<&'a Component> {
        self.components.iter().copied().find(|c| c.kind.is_database())
    }

    pub fn web_framework(&self) -> Option<&'a Component> {
        self.components
            .iter()
            .copied()
            .find(|c| matches!(c.kind, ComponentKind::WebFramework { .. }))
    }
}

#[cfg(test)]
mod tests {
    use crate::components::ComponentRegistry;

    #[test]
    fn test_requirement_strings_deduplicated_in_catalog_order() {
        let registry = ComponentRegistry::botango().unwrap();
        let resolved = registry
            .resolve(&["migrations", "database", "aiosqlite", "handlers", "base"])
            .unwrap();
        assert_eq!(
            resolved.requirement_strings(),
            vec![
                "aiogram>=3.8.0",
                "python-dotenv",
                "alembic>=1.12.0",
                "sqlalchemy>=2.0.44",
                "aiosqlite>=0.20.0",
            ]
        );
    }

    #[test]
    fn test_database_and_framework_lookup() {
        let registry = ComponentRegistry::botango().unwrap();
        let resolved = registry
            .resolve(&[
                "base",
                "handlers",
                "database",
                "docker",
                "aiosqlite-docker",
                "fastapi",
            ])
            .unwrap();
        assert_eq!(resolved.database().unwrap().name, "aiosqlite-docker");
        assert_eq!(resolved.web_framework().unwrap().name, "fastapi");
        assert!(resolved.contains("docker"));
        assert!(!resolved.contains("django"));
    }

    #[test]
    fn test_selection_error_lists_violations() {
        let registry = ComponentRegistry::botango().unwrap();
        let err = registry.resolve(&["handlers", "ghost"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid component selection: component 'ghost' not found; \
             component 'handlers' incompatible with current selection; \
             required component 'base' not selected"
        );
    }
}
