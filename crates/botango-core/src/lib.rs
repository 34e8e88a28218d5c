//! Botango Core - Component selection and project generation for aiogram bots
//!
//! This library decides which components a bot project is built from and
//! writes the project those components describe. The `botango` CLI is a thin
//! layer over it.
//!
//! # Architecture
//!
//! - **Components** - The built-in catalog and the rules a selection must satisfy
//! - **Generation** - `.env` blocks, the TOML project manifest, rendered templates
//!   and `requirements.txt`, orchestrated by `ProjectBuilder`
//! - **CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use botango_core::ComponentRegistry;
//!
//! let registry = ComponentRegistry::botango()?;
//! let violations = registry.validate_selection(&["base", "docker", "postgresql"]);
//! for violation in &violations {
//!     eprintln!("{violation}");
//! }
//! ```

mod atomic;

pub mod components;
pub mod env;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use components::{
    CatalogError, Component, ComponentKind, ComponentRegistry, Dependency, ResolvedSelection,
    SelectionError, Violation,
};
pub use env::{EnvBlock, EnvStore, EnvStoreConfig};
pub use project::{BuildReport, ProjectBuilder, ProjectLayout, ProjectManifest, DEFAULT_SELECTION};
pub use runtime::{check_python, RuntimeInfo};
pub use templates::{Renderer, TemplatePack};

#[cfg(feature = "tui")]
pub use tui::run;
