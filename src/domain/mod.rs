//! Domain layer: settings schema, path templating and layer resolution
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod resolver;
pub mod template;

pub use entities::*;
pub use error::DomainError;
pub use resolver::{resolve, LayeredSettings, Provenance, ResolvedSettings, SettingsLayer};
pub use template::{expand_path, render, TemplateVars};
