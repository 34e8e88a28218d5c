//! Component catalog lookup and selection validation

use super::component::Component;
use super::resolve::{ResolvedSelection, SelectionError, Violation};
use std::collections::HashSet;
use thiserror::Error;

/// Database components that need a docker-flavored counterpart when
/// the project is packaged with docker
const PLAIN_DATABASES: &[&str] = &["aiosqlite", "postgresql", "postgresql-sync"];

const DOCKER: &str = "docker";

/// A defect in the static catalog. Raised at construction, never during
/// selection validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("component '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("component '{component}' lists itself in {field}")]
    SelfReference {
        component: String,
        field: &'static str,
    },

    #[error("component '{component}' lists unknown component '{target}' in {field}")]
    DanglingReference {
        component: String,
        field: &'static str,
        target: String,
    },
}

/// The catalog of every known component
///
/// Iteration order is fixed: the named slots first, then the database,
/// web framework and docker database groups.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    slots: Vec<Component>,
    databases: Vec<Component>,
    web_frameworks: Vec<Component>,
    docker_databases: Vec<Component>,
}

impl ComponentRegistry {
    /// Build a registry, rejecting duplicate names and `requires` /
    /// `conflicts_with` entries that are self-referential or unknown.
    pub fn new(
        slots: Vec<Component>,
        databases: Vec<Component>,
        web_frameworks: Vec<Component>,
        docker_databases: Vec<Component>,
    ) -> Result<Self, CatalogError> {
        let registry = Self {
            slots,
            databases,
            web_frameworks,
            docker_databases,
        };
        registry.check_consistency()?;
        Ok(registry)
    }

    /// The built-in botango catalog
    pub fn botango() -> Result<Self, CatalogError> {
        super::catalog::botango_registry()
    }

    fn check_consistency(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        for component in self.all_components() {
            if !names.insert(component.name.as_str()) {
                return Err(CatalogError::DuplicateName(component.name.clone()));
            }
        }

        for component in self.all_components() {
            let fields = [
                ("requires", &component.requires),
                ("conflicts_with", &component.conflicts_with),
            ];
            for (field, targets) in fields {
                for target in targets {
                    if *target == component.name {
                        return Err(CatalogError::SelfReference {
                            component: component.name.clone(),
                            field,
                        });
                    }
                    if !names.contains(target.as_str()) {
                        return Err(CatalogError::DanglingReference {
                            component: component.name.clone(),
                            field,
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Every component, in catalog order
    pub fn all_components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.slots
            .iter()
            .chain(&self.databases)
            .chain(&self.web_frameworks)
            .chain(&self.docker_databases)
    }

    pub fn database_components(&self) -> &[Component] {
        &self.databases
    }

    pub fn web_components(&self) -> &[Component] {
        &self.web_frameworks
    }

    pub fn docker_database_components(&self) -> &[Component] {
        &self.docker_databases
    }

    /// Exact, case-sensitive lookup
    pub fn component_by_name(&self, name: &str) -> Option<&Component> {
        self.all_components().find(|c| c.name == name)
    }

    /// Docker variant of a database component, e.g. `aiosqlite` ->
    /// `aiosqlite-docker`. Only the docker database group is searched.
    pub fn docker_database_component_for(&self, base_name: &str) -> Option<&Component> {
        let docker_name = format!("{}-docker", base_name);
        self.docker_databases.iter().find(|c| c.name == docker_name)
    }

    /// Collect every reason the selection is invalid. An empty result
    /// means the selection can be generated.
    ///
    /// Order: unknown names, incompatibilities (input order), missing
    /// required components (catalog order), docker problems.
    pub fn validate_selection<S: AsRef<str>>(&self, names: &[S]) -> Vec<Violation> {
        let names = dedup(names);
        let selected: HashSet<&str> = names.iter().copied().collect();

        let mut not_found = Vec::new();
        let mut incompatible = Vec::new();
        for name in &names {
            match self.component_by_name(name) {
                Some(component) if !component.is_compatible_with(&selected) => {
                    incompatible.push(Violation::Incompatible(component.name.clone()));
                }
                Some(_) => {}
                None => not_found.push(Violation::NotFound(name.to_string())),
            }
        }

        let missing_required = self
            .all_components()
            .filter(|c| c.required && !selected.contains(c.name.as_str()))
            .map(|c| Violation::MissingRequired(c.name.clone()));

        let mut violations = not_found;
        violations.append(&mut incompatible);
        violations.extend(missing_required);
        violations.extend(self.docker_violations(&selected));
        violations
    }

    /// Docker packaging needs the docker flavor of the chosen database
    pub fn validate_docker_compatibility<S: AsRef<str>>(&self, names: &[S]) -> Vec<Violation> {
        let selected: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        self.docker_violations(&selected)
    }

    fn docker_violations(&self, selected: &HashSet<&str>) -> Vec<Violation> {
        let has_docker = selected.contains(DOCKER);
        let has_plain_db = PLAIN_DATABASES.iter().any(|name| selected.contains(name));
        let has_docker_db = self
            .docker_databases
            .iter()
            .any(|c| selected.contains(c.name.as_str()));

        if has_docker && has_plain_db && !has_docker_db {
            vec![Violation::DockerDatabase]
        } else {
            Vec::new()
        }
    }

    /// Validate and, when clean, resolve names to their components
    pub fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<ResolvedSelection<'_>, SelectionError> {
        let violations = self.validate_selection(names);
        if !violations.is_empty() {
            return Err(SelectionError { violations });
        }

        let selected: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        let components = self
            .all_components()
            .filter(|c| selected.contains(c.name.as_str()))
            .collect();
        Ok(ResolvedSelection::new(components))
    }
}

/// Drop repeated names, keeping the first occurrence
fn dedup<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .collect()
}
