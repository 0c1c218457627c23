//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, SettingKey};
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    /// An error caused by a setting, with the layer that set it.
    #[error("{source}")]
    Setting {
        #[source]
        source: InfraError,
        key: SettingKey,
        set_by: String,
    },
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// `<key> set by: <layer>` when the error is tied to a setting.
    pub fn annotation(&self) -> Option<String> {
        match self {
            CliError::Setting { key, set_by, .. } => Some(format!("{key} set by: {set_by}")),
            _ => None,
        }
    }

    /// Attach provenance using `lookup` when the error names a setting.
    pub fn with_provenance<'a>(self, lookup: impl Fn(SettingKey) -> Option<&'a str>) -> Self {
        let CliError::Infra(source) = self else {
            return self;
        };
        match source.settings_key() {
            Some(key) => match lookup(key) {
                Some(layer) => CliError::Setting {
                    source,
                    key,
                    set_by: layer.to_string(),
                },
                None => CliError::Infra(source),
            },
            None => CliError::Infra(source),
        }
    }
}
