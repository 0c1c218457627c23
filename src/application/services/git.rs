//! Git command wrapper
//!
//! All git invocations go through the `CommandRunner` boundary; a non-zero
//! exit becomes an `InfraError::Git` carrying stderr and the exit code.

use std::fmt;
use std::path::PathBuf;
use std::process::Output;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::CommandRunner;
use crate::infrastructure::InfraError;

/// A fully resolved `git archive` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCommand {
    pub branch: String,
    pub format: String,
    pub prefix: String,
    pub output: PathBuf,
}

impl ArchiveCommand {
    /// Arguments after `git`.
    pub fn args(&self) -> Vec<String> {
        vec![
            "archive".to_string(),
            format!("--format={}", self.format),
            format!("--prefix={}", self.prefix),
            "-o".to_string(),
            self.output.display().to_string(),
            self.branch.clone(),
        ]
    }
}

impl fmt::Display for ArchiveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "git archive --format={} --prefix=\"{}\" -o {} {}",
            self.format,
            self.prefix,
            self.output.display(),
            self.branch
        )
    }
}

/// Thin wrapper around the git CLI.
pub struct GitService {
    cmd: Arc<dyn CommandRunner>,
}

impl GitService {
    pub fn new(cmd: Arc<dyn CommandRunner>) -> Self {
        Self { cmd }
    }

    /// Spawn git and return its raw output, whatever the exit status.
    fn output(&self, args: &[&str]) -> ApplicationResult<Output> {
        debug!("git {}", args.join(" "));
        self.cmd
            .run("git", args)
            .with_context(|| format!("run git {}", args.join(" ")))
    }

    /// Run git and return stdout; a non-zero exit is an error.
    fn run(&self, args: &[&str]) -> ApplicationResult<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ApplicationError::OperationFailed {
                context: format!("git {}: {}", args.join(" "), stderr),
                source: Box::new(InfraError::Git {
                    message: stderr,
                    exit_code: output.status.code(),
                }),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git status --porcelain`; empty when the working tree is clean.
    pub fn status_porcelain(&self) -> ApplicationResult<String> {
        self.run(&["status", "--porcelain"])
    }

    /// `git describe --tags`, trimmed.
    ///
    /// Fails with `NoTags` when git cannot describe the current commit.
    pub fn describe_tags(&self) -> ApplicationResult<String> {
        let output = self.output(&["describe", "--tags"])?;
        let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || described.is_empty() {
            debug!(
                "describe_tags: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(ApplicationError::NoTags);
        }
        Ok(described)
    }

    /// Create the archive described by `command`.
    pub fn archive(&self, command: &ArchiveCommand) -> ApplicationResult<()> {
        let args = command.args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&args).map(|_| ())
    }
}
