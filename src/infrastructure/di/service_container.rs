//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{
    PreflightService, PublishService, SettingsService, VersionService,
};
use crate::infrastructure::traits::{
    CommandRunner, EnvReader, FileSystem, ProcessEnv, Prompter, RealCommandRunner,
    RealFileSystem, StdinPrompter,
};

/// Container holding the I/O boundaries every service is built from.
pub struct ServiceContainer {
    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Interactive confirmation
    pub prompt: Arc<dyn Prompter>,

    /// Environment variable lookup
    pub env: Arc<dyn EnvReader>,
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new() -> Self {
        Self::with_deps(
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
            Arc::new(StdinPrompter),
            Arc::new(ProcessEnv),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        prompt: Arc<dyn Prompter>,
        env: Arc<dyn EnvReader>,
    ) -> Self {
        Self {
            fs,
            cmd,
            prompt,
            env,
        }
    }

    pub fn settings_service(&self) -> SettingsService {
        SettingsService::new(self.fs.clone(), self.prompt.clone())
    }

    pub fn version_service(&self) -> VersionService {
        VersionService::new(self.cmd.clone())
    }

    pub fn preflight_service(&self) -> PreflightService {
        PreflightService::new(self.cmd.clone(), self.env.clone())
    }

    pub fn publish_service(&self) -> PublishService {
        PublishService::new(self.fs.clone(), self.cmd.clone(), self.prompt.clone())
    }
}
