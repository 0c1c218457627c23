//! Settings layer resolution with provenance
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global settings from the settings file
//! 3. Settings of the selected destination
//! 4. Override layers supplied by the caller (environment, then CLI)
//!
//! Each layer is a partial record; merge is per key, last writer wins. The
//! layer that last wrote each key is kept in a side table so errors can say
//! where an offending value came from.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Archive, CommonSettings, DomainError, FileSpec, PublishSettings, SettingKey, VersionSource,
};

/// Name of the layer holding compiled defaults.
pub const DEFAULT_LAYER: &str = "default";

/// One named partial settings record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLayer {
    pub name: String,
    pub values: CommonSettings,
}

impl SettingsLayer {
    pub fn new(name: impl Into<String>, values: CommonSettings) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Which layer last set each key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance(BTreeMap<SettingKey, String>);

impl Provenance {
    pub fn set_by(&self, key: SettingKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn record(&mut self, key: SettingKey, layer: &str) {
        self.0.insert(key, layer.to_string());
    }
}

/// Ordered stack of layers, lowest precedence first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredSettings {
    layers: Vec<SettingsLayer>,
}

impl Default for LayeredSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredSettings {
    /// Start a stack holding only the compiled defaults.
    pub fn new() -> Self {
        Self {
            layers: vec![SettingsLayer::new(DEFAULT_LAYER, CommonSettings::defaults())],
        }
    }

    pub fn push(&mut self, layer: SettingsLayer) {
        self.layers.push(layer);
    }

    pub fn with_layer(mut self, name: impl Into<String>, values: CommonSettings) -> Self {
        self.push(SettingsLayer::new(name, values));
        self
    }

    pub fn layers(&self) -> &[SettingsLayer] {
        &self.layers
    }

    /// Merge all layers into one record and its provenance.
    pub fn merge(&self) -> (CommonSettings, Provenance) {
        let mut merged = CommonSettings::default();
        let mut provenance = Provenance::default();

        for layer in &self.layers {
            for key in merged.overlay(&layer.values) {
                provenance.record(key, &layer.name);
            }
        }

        (merged, provenance)
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSettings {
    pub destination: String,
    pub ensure_make: bool,
    pub user_prompt: bool,
    pub git_allow_uncommitted: bool,
    pub overwrite: bool,
    pub version: VersionSource,
    pub files: Vec<FileSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<Archive>,
    #[serde(skip)]
    pub provenance: Provenance,
}

impl ResolvedSettings {
    /// Layer that set `key`, for error annotations.
    pub fn set_by(&self, key: SettingKey) -> Option<&str> {
        self.provenance.set_by(key)
    }
}

/// Name of the layer holding the file-level settings.
pub fn global_layer_name(origin: &str) -> String {
    origin.to_string()
}

/// Name of the layer holding a destination's settings.
pub fn destination_layer_name(origin: &str, destination: &str) -> String {
    format!("{origin}:destinations.{destination}")
}

/// Resolve the effective settings for `destination`.
///
/// `origin` names the settings file in provenance. `overrides` are applied
/// on top of the destination settings in the given order.
pub fn resolve(
    settings: &PublishSettings,
    origin: &str,
    destination: &str,
    overrides: &[SettingsLayer],
) -> Result<ResolvedSettings, DomainError> {
    let dest = settings
        .destinations
        .get(destination)
        .ok_or_else(|| DomainError::UnknownDestination {
            name: destination.to_string(),
            valid: settings.destination_names(),
        })?;

    let mut layered = LayeredSettings::new()
        .with_layer(global_layer_name(origin), settings.globals())
        .with_layer(destination_layer_name(origin, destination), dest.overrides());
    for layer in overrides {
        layered.push(layer.clone());
    }

    let (merged, provenance) = layered.merge();
    debug!("resolve: destination={destination}, merged={merged:?}");

    Ok(ResolvedSettings {
        destination: destination.to_string(),
        // the default layer sets every key, so these fallbacks are never taken
        ensure_make: merged.ensure_make.unwrap_or(true),
        user_prompt: merged.user_prompt.unwrap_or(true),
        git_allow_uncommitted: merged.git_allow_uncommitted.unwrap_or(false),
        overwrite: merged.overwrite.unwrap_or(false),
        version: merged.version.unwrap_or(VersionSource::GitDescribe),
        files: dest.files.clone(),
        archive: settings.archive.clone(),
        provenance,
    })
}
