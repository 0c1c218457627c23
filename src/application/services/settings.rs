//! Settings file service: load, validate, generate and example

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{parse_settings, EXAMPLE, TEMPLATE};
use crate::domain::PublishSettings;
use crate::infrastructure::traits::{FileSystem, Prompter};

/// Result of `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Template written to the settings path
    Written,
    /// File existed and overwriting was not confirmed; nothing written
    Declined,
}

/// Owns everything that touches the settings file.
pub struct SettingsService {
    fs: Arc<dyn FileSystem>,
    prompt: Arc<dyn Prompter>,
}

impl SettingsService {
    pub fn new(fs: Arc<dyn FileSystem>, prompt: Arc<dyn Prompter>) -> Self {
        Self { fs, prompt }
    }

    /// Read, parse and validate the settings file.
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<PublishSettings> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::SettingsNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read settings file", path)?;
        let settings = parse_settings(&content, path)?;
        debug!(
            "load: {} destination(s), archive={}",
            settings.destinations.len(),
            settings.archive.is_some()
        );
        Ok(settings)
    }

    /// The example settings, checked against the schema first.
    pub fn example(&self) -> ApplicationResult<&'static str> {
        parse_settings(EXAMPLE, Path::new("example settings"))?;
        Ok(EXAMPLE)
    }

    /// Write the template to `path`.
    ///
    /// An existing file is only replaced after an explicit confirmation.
    #[instrument(skip(self))]
    pub fn generate(&self, path: &Path) -> ApplicationResult<GenerateOutcome> {
        if self.fs.exists(path) {
            let question = format!("\"{}\" exists. Overwrite [y/n]?", path.display());
            let confirmed = self
                .prompt
                .confirm(&question)
                .with_path_context("confirm overwrite", path)?;
            if !confirmed {
                return Ok(GenerateOutcome::Declined);
            }
        }
        self.fs
            .write(path, TEMPLATE)
            .with_path_context("write settings file", path)?;
        Ok(GenerateOutcome::Written)
    }
}
