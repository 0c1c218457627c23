//! Preflight checks run before anything is copied

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::GitService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::ResolvedSettings;
use crate::infrastructure::traits::{CommandRunner, EnvReader};

/// Set by make in every recursive invocation.
pub const BUILD_CONTEXT_VAR: &str = "MAKELEVEL";

/// Outcome of a passing preflight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightReport {
    /// `git status --porcelain` output when the tree is dirty but allowed
    pub uncommitted: Option<String>,
}

/// Checks the calling environment and working tree.
pub struct PreflightService {
    git: GitService,
    env: Arc<dyn EnvReader>,
}

impl PreflightService {
    pub fn new(cmd: Arc<dyn CommandRunner>, env: Arc<dyn EnvReader>) -> Self {
        Self {
            git: GitService::new(cmd),
            env,
        }
    }

    pub fn check(&self, settings: &ResolvedSettings) -> ApplicationResult<PreflightReport> {
        if settings.ensure_make {
            let level = self.env.var(BUILD_CONTEXT_VAR).unwrap_or_default();
            debug!("check: {BUILD_CONTEXT_VAR}={level:?}");
            if level.is_empty() {
                return Err(ApplicationError::NotInBuildContext);
            }
        }

        let status = self.git.status_porcelain()?;
        if status.trim().is_empty() {
            return Ok(PreflightReport::default());
        }
        if !settings.git_allow_uncommitted {
            return Err(ApplicationError::UncommittedChanges { status });
        }

        warn!("uncommitted changes allowed by git_allow_uncommitted");
        Ok(PreflightReport {
            uncommitted: Some(status),
        })
    }
}
