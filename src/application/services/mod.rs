//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner, etc.)
//! but are themselves concrete structs, not traits.

mod git;
mod preflight;
mod publish;
mod settings;
mod version;

pub use git::{ArchiveCommand, GitService};
pub use preflight::{PreflightReport, PreflightService, BUILD_CONTEXT_VAR};
pub use publish::{
    PlannedArchive, PlannedCopy, PublishEvent, PublishPlan, PublishService, PublishSummary,
};
pub use settings::{GenerateOutcome, SettingsService};
pub use version::VersionService;
