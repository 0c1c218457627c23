//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, SettingKey};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("settings file {0} does not exist\nYou can generate one using `publish -G`")]
    SettingsNotFound(PathBuf),

    #[error("no tags found, add a tag with \"git tag\"")]
    NoTags,

    #[error("version is user_supplied but no version string was given (use --user-version)")]
    MissingVersion,

    #[error("not being called with make, exiting")]
    NotInBuildContext,

    #[error("uncommitted changes, cannot run\n{status}")]
    UncommittedChanges { status: String },

    #[error("{0} already exists")]
    TargetExists(PathBuf),

    #[error("source file {0} does not exist")]
    SourceNotFound(PathBuf),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Settings key whose value led to this error, if any.
    pub fn settings_key(&self) -> Option<SettingKey> {
        match self {
            ApplicationError::NotInBuildContext => Some(SettingKey::EnsureMake),
            ApplicationError::UncommittedChanges { .. } => Some(SettingKey::GitAllowUncommitted),
            ApplicationError::TargetExists(_) => Some(SettingKey::Overwrite),
            ApplicationError::NoTags | ApplicationError::MissingVersion => {
                Some(SettingKey::Version)
            }
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
