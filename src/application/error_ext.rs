//! Context helpers for fallible boundary calls

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turn an `io::Result` from a boundary trait into an `OperationFailed`.
pub trait IoResultExt<T> {
    /// Context is `"<action>: <path>"`, e.g. `copy file: build/paper.pdf`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Context is the given string as is.
    fn with_context(self, context: impl FnOnce() -> String) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.with_context(|| format!("{action}: {}", path.display()))
    }

    fn with_context(self, context: impl FnOnce() -> String) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: context(),
            source: Box::new(e),
        })
    }
}
