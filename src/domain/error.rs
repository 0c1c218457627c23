//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent settings and template violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid settings: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("destination name \"{name}\" not recognized\nMust be one of: {}", .valid.join(", "))]
    UnknownDestination { name: String, valid: Vec<String> },

    #[error("template \"{template}\" references unbound field {{{placeholder}}}")]
    UnboundPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("malformed template \"{template}\": {reason}")]
    MalformedTemplate { template: String, reason: String },
}
