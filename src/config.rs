//! Settings file loading and environment overrides
//!
//! The settings file is TOML with a strict schema: unknown keys, missing
//! required keys and wrongly typed values are all rejected.
//!
//! Layers (lowest to highest precedence):
//! 1. Compiled defaults
//! 2. Global settings: top-level keys of `publish_settings.toml`
//! 3. Destination settings: `[destinations.<name>]`
//! 4. Environment variables: `PUBLISH_*` prefix
//! 5. Command-line flags

use std::path::Path;

use config::{Config, ConfigError, Environment};
use serde::de::DeserializeOwned;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CommonSettings, PublishSettings, ResolvedSettings};
use crate::infrastructure::traits::EnvReader;

/// Settings file looked up in the current directory.
pub const DEFAULT_SETTINGS_FILE: &str = "publish_settings.toml";

/// Prefix of the environment override variables, e.g. `PUBLISH_OVERWRITE`.
pub const ENV_PREFIX: &str = "PUBLISH";

/// Provenance name of the environment layer.
pub const ENV_LAYER: &str = "environment";

/// Provenance name of the command-line layer.
pub const ARGS_LAYER: &str = "args";

/// Parse and validate settings file content.
///
/// `origin` is only used in error messages.
pub fn parse_settings(content: &str, origin: &Path) -> ApplicationResult<PublishSettings> {
    let settings: PublishSettings =
        toml::from_str(content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", origin.display(), e),
        })?;
    settings.validate().map_err(|e| ApplicationError::Config {
        message: format!("{}: {}", origin.display(), e),
    })?;
    Ok(settings)
}

/// Read `PUBLISH_*` variables through `env`.
pub fn env_overrides(env: &dyn EnvReader) -> ApplicationResult<CommonSettings> {
    let vars = env
        .vars_with_prefix(&format!("{ENV_PREFIX}_"))
        .into_iter()
        .collect();
    env_overrides_from(vars)
}

/// Read `PUBLISH_*` variables from `vars`; other names are ignored.
pub fn env_overrides_from(vars: config::Map<String, String>) -> ApplicationResult<CommonSettings> {
    let config = Config::builder()
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .source(Some(vars)),
        )
        .build()
        .map_err(config_err)?;

    Ok(CommonSettings {
        ensure_make: env_value(&config, "ensure_make")?,
        user_prompt: env_value(&config, "user_prompt")?,
        git_allow_uncommitted: env_value(&config, "git_allow_uncommitted")?,
        overwrite: env_value(&config, "overwrite")?,
        version: env_value(&config, "version")?,
    })
}

fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> ApplicationResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("{}_{}: {}", ENV_PREFIX, key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Show effective settings as TOML.
pub fn to_toml(settings: &ResolvedSettings) -> ApplicationResult<String> {
    toml::to_string_pretty(settings).map_err(|e| ApplicationError::Config {
        message: format!("serialize settings: {e}"),
    })
}

/// Fill-in-the-blanks settings file written by `publish -G`.
pub const TEMPLATE: &str = r#"# publish settings
#
# Precedence (lowest to highest):
#   top-level keys < [destinations.<name>] keys < PUBLISH_* env vars < CLI flags
#
# Paths may use {destination} and {version}; a leading ~ is your home directory.

# Optional, defaults shown.
ensure_make = true
user_prompt = true
git_allow_uncommitted = false
overwrite = false
version = "git_describe"  # or "user_supplied" (pass --user-version)

# At least one destination, each with at least one file.
[[destinations.draft.files]]
source = "<enter_path_here>"
target = "<enter_path_here>"

[[destinations.release.files]]
source = "<enter_path_here>"
target = "<enter_path_here>"

# Optional.
[archive]
branch = "main"
format = "tgz"
prefix = "<enter_prefix_here>"
target = "<enter_path_here>"
"#;

/// Complete example printed by `publish -E`.
pub const EXAMPLE: &str = r#"ensure_make = true
user_prompt = true
git_allow_uncommitted = false
version = "git_describe"

[[destinations.draft.files]]
source = "intraseasonal_srp_erl/_build/intraseasonal_srp.pdf"
target = "~/Dropbox/Academic/Projects/COSMIC/Writeups/intraseasonal_srp/{destination}/intraseasonal_srp_{version}.pdf"

[destinations.release]
git_allow_uncommitted = false

[[destinations.release.files]]
source = "intraseasonal_srp_erl/_build/intraseasonal_srp.pdf"
target = "~/Dropbox/Academic/Projects/COSMIC/Writeups/intraseasonal_srp/{destination}/intraseasonal_srp_{version}.pdf"

[archive]
branch = "main"
format = "tgz"
prefix = "intraseasonal_srp/"
target = "~/Dropbox/Academic/Projects/COSMIC/Writeups/intraseasonal_srp/archive/intraseasonal_srp_{version}.tgz"
"#;
