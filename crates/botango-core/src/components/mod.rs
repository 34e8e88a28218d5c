//! Component catalog and selection resolution
//!
//! This module provides:
//! - The component data model (Dependency, Component, ComponentKind)
//! - The built-in catalog of bot project components
//! - Selection validation and resolution (ComponentRegistry, Violation)

pub mod catalog;
pub mod component;
pub mod dependency;
pub mod registry;
pub mod resolve;

pub use component::{Component, ComponentKind};
pub use dependency::{Dependency, VersionSeparator};
pub use registry::{CatalogError, ComponentRegistry};
pub use resolve::{ResolvedSelection, SelectionError, Violation};
