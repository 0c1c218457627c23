//! Domain entities: the settings schema
//!
//! The settings file deserializes straight into [`PublishSettings`]. Every struct
//! rejects unknown keys, so a typo in the file is an error instead of a silently
//! ignored setting.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Where the version string substituted into paths comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    /// Most recent tag description from `git describe --tags`
    #[value(name = "git_describe")]
    GitDescribe,
    /// Version string passed on the command line
    #[value(name = "user_supplied")]
    UserSupplied,
}

impl VersionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSource::GitDescribe => "git_describe",
            VersionSource::UserSupplied => "user_supplied",
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the settings that every layer may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    EnsureMake,
    UserPrompt,
    GitAllowUncommitted,
    Overwrite,
    Version,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::EnsureMake,
        SettingKey::UserPrompt,
        SettingKey::GitAllowUncommitted,
        SettingKey::Overwrite,
        SettingKey::Version,
    ];

    /// Key as written in the settings file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::EnsureMake => "ensure_make",
            SettingKey::UserPrompt => "user_prompt",
            SettingKey::GitAllowUncommitted => "git_allow_uncommitted",
            SettingKey::Overwrite => "overwrite",
            SettingKey::Version => "version",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial settings record produced by one layer.
///
/// `None` means the layer does not set the key and the value from a
/// lower-precedence layer is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonSettings {
    pub ensure_make: Option<bool>,
    pub user_prompt: Option<bool>,
    pub git_allow_uncommitted: Option<bool>,
    pub overwrite: Option<bool>,
    pub version: Option<VersionSource>,
}

impl CommonSettings {
    /// Values used when no layer sets a key.
    pub fn defaults() -> Self {
        Self {
            ensure_make: Some(true),
            user_prompt: Some(true),
            git_allow_uncommitted: Some(false),
            overwrite: Some(false),
            version: Some(VersionSource::GitDescribe),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set_keys().is_empty()
    }

    /// Keys this record sets, in declaration order.
    pub fn set_keys(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| match key {
                SettingKey::EnsureMake => self.ensure_make.is_some(),
                SettingKey::UserPrompt => self.user_prompt.is_some(),
                SettingKey::GitAllowUncommitted => self.git_allow_uncommitted.is_some(),
                SettingKey::Overwrite => self.overwrite.is_some(),
                SettingKey::Version => self.version.is_some(),
            })
            .collect()
    }

    /// Overlay `other` onto self: every key set in `other` wins.
    ///
    /// Returns the keys that were written.
    pub fn overlay(&mut self, other: &CommonSettings) -> Vec<SettingKey> {
        if let Some(v) = other.ensure_make {
            self.ensure_make = Some(v);
        }
        if let Some(v) = other.user_prompt {
            self.user_prompt = Some(v);
        }
        if let Some(v) = other.git_allow_uncommitted {
            self.git_allow_uncommitted = Some(v);
        }
        if let Some(v) = other.overwrite {
            self.overwrite = Some(v);
        }
        if let Some(v) = other.version {
            self.version = Some(v);
        }
        other.set_keys()
    }
}

/// One file to publish. Both paths are templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    pub source: String,
    pub target: String,
}

/// `git archive` snapshot created after the files are copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Archive {
    pub branch: String,
    pub format: String,
    pub prefix: String,
    /// Output path template
    pub target: String,
}

/// Named publishing target with its own files and setting overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Destination {
    pub ensure_make: Option<bool>,
    pub user_prompt: Option<bool>,
    pub git_allow_uncommitted: Option<bool>,
    pub overwrite: Option<bool>,
    pub version: Option<VersionSource>,
    pub files: Vec<FileSpec>,
}

impl Destination {
    /// The settings this destination overrides.
    pub fn overrides(&self) -> CommonSettings {
        CommonSettings {
            ensure_make: self.ensure_make,
            user_prompt: self.user_prompt,
            git_allow_uncommitted: self.git_allow_uncommitted,
            overwrite: self.overwrite,
            version: self.version,
        }
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSettings {
    pub ensure_make: Option<bool>,
    pub user_prompt: Option<bool>,
    pub git_allow_uncommitted: Option<bool>,
    pub overwrite: Option<bool>,
    pub version: Option<VersionSource>,
    pub destinations: BTreeMap<String, Destination>,
    pub archive: Option<Archive>,
}

impl PublishSettings {
    /// The global (file-level) settings.
    pub fn globals(&self) -> CommonSettings {
        CommonSettings {
            ensure_make: self.ensure_make,
            user_prompt: self.user_prompt,
            git_allow_uncommitted: self.git_allow_uncommitted,
            overwrite: self.overwrite,
            version: self.version,
        }
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.destinations.keys().cloned().collect()
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.destinations.is_empty() {
            return Err(DomainError::Validation {
                field: "destinations".into(),
                reason: "there must be at least one destination".into(),
            });
        }
        for (name, destination) in &self.destinations {
            if destination.files.is_empty() {
                return Err(DomainError::Validation {
                    field: format!("destinations.{name}.files"),
                    reason: "there must be at least one file to copy".into(),
                });
            }
        }
        Ok(())
    }
}
