//! Template pack loading and project file generation
//!
//! This module provides:
//! - Template pack manifest types (PackManifest, ComponentTemplates)
//! - The Renderer seam, implemented by TemplatePack with placeholder substitution
//! - The template pack compiled into the binary
//! - Writing a resolved selection's files into a project directory
//! - Version compatibility checking between pack and CLI

mod bundled;
pub mod manifest;
pub mod pack;
pub mod render;
pub mod version;
pub mod writer;

pub use manifest::{ComponentTemplates, PackManifest, TemplateFile};
pub use pack::{TemplatePack, TEMPLATE_DIR_ENV};
pub use render::{substitute, Renderer, TemplateVars};
pub use version::check_compatibility;
pub use writer::{project_vars, write_project};
