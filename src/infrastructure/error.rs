//! Errors raised at the process boundary

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::SettingKey;

/// Everything below the CLI, plus failures of external processes.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// git ran but exited non-zero; `message` is its stderr
    #[error("git exited with {}: {message}", .exit_code.map_or("signal".to_string(), |c| c.to_string()))]
    Git {
        message: String,
        exit_code: Option<i32>,
    },
}

impl InfraError {
    /// Setting responsible for this error, if any.
    pub fn settings_key(&self) -> Option<SettingKey> {
        match self {
            InfraError::Application(e) => e.settings_key(),
            InfraError::Git { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_git_failure_when_displayed_then_exit_code_and_stderr() {
        let err = InfraError::Git {
            message: "fatal: bad revision".into(),
            exit_code: Some(128),
        };
        assert_eq!(err.to_string(), "git exited with 128: fatal: bad revision");
        assert_eq!(err.settings_key(), None);
    }
}
