//! Version string resolution

use std::sync::Arc;

use tracing::debug;

use crate::application::services::GitService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::VersionSource;
use crate::infrastructure::traits::CommandRunner;

/// Resolves the version string substituted into paths.
pub struct VersionService {
    git: GitService,
}

impl VersionService {
    pub fn new(cmd: Arc<dyn CommandRunner>) -> Self {
        Self {
            git: GitService::new(cmd),
        }
    }

    /// Resolve the version for `source`.
    ///
    /// `user_version` is the string passed on the command line; it is only
    /// consulted for `user_supplied`.
    pub fn resolve(
        &self,
        source: VersionSource,
        user_version: Option<&str>,
    ) -> ApplicationResult<String> {
        let version = match source {
            VersionSource::GitDescribe => self.git.describe_tags()?,
            VersionSource::UserSupplied => user_version
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ApplicationError::MissingVersion)?,
        };
        debug!("resolve: source={source}, version={version}");
        Ok(version)
    }
}
