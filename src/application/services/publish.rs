//! Publishing: resolve paths, confirm, copy, archive
//!
//! Work is split into a plan and its execution. Planning resolves every
//! template and checks every precondition, so a failing check leaves the
//! filesystem untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::{ArchiveCommand, GitService};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{expand_path, ResolvedSettings, TemplateVars};
use crate::infrastructure::traits::{CommandRunner, FileSystem, Prompter};

/// One resolved source/target pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Resolved archive step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArchive {
    pub command: ArchiveCommand,
}

impl PlannedArchive {
    pub fn target(&self) -> &Path {
        &self.command.output
    }
}

/// Everything a run will do, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    pub files: Vec<PlannedCopy>,
    pub archive: Option<PlannedArchive>,
}

/// Progress reported while a plan executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    Created { source: PathBuf, target: PathBuf },
    WouldCreate { source: PathBuf, target: PathBuf },
    Declined { target: PathBuf },
    ArchiveCreated { target: PathBuf },
    ArchiveDryRun { command: String },
    ArchiveDeclined { target: PathBuf },
}

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub created: usize,
    pub declined: usize,
    pub archived: bool,
}

/// Copies files to their targets and creates the archive.
pub struct PublishService {
    fs: Arc<dyn FileSystem>,
    git: GitService,
    prompt: Arc<dyn Prompter>,
}

impl PublishService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        prompt: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            fs,
            git: GitService::new(cmd),
            prompt,
        }
    }

    /// Resolve all paths and check preconditions without touching anything.
    #[instrument(skip(self, settings), fields(destination = %settings.destination))]
    pub fn plan(&self, settings: &ResolvedSettings, version: &str) -> ApplicationResult<PublishPlan> {
        let vars = TemplateVars::new(&settings.destination, version);
        // targets claimed by earlier entries of this plan
        let mut planned = HashSet::new();

        let mut files = Vec::with_capacity(settings.files.len());
        for spec in &settings.files {
            let source = expand_path(&spec.source, &vars)?;
            let target = expand_path(&spec.target, &vars)?;
            if !self.fs.is_file(&source) {
                return Err(ApplicationError::SourceNotFound(source));
            }
            self.check_target(&target, settings.overwrite, &mut planned)?;
            files.push(PlannedCopy { source, target });
        }

        let archive = match &settings.archive {
            Some(archive) => {
                let output = expand_path(&archive.target, &vars)?;
                self.check_target(&output, settings.overwrite, &mut planned)?;
                Some(PlannedArchive {
                    command: ArchiveCommand {
                        branch: archive.branch.clone(),
                        format: archive.format.clone(),
                        prefix: archive.prefix.clone(),
                        output,
                    },
                })
            }
            None => None,
        };

        debug!("plan: {} file(s), archive={}", files.len(), archive.is_some());
        Ok(PublishPlan { files, archive })
    }

    /// Without `overwrite`, a target may neither exist already nor be written
    /// twice by the same run.
    fn check_target(
        &self,
        target: &Path,
        overwrite: bool,
        planned: &mut HashSet<PathBuf>,
    ) -> ApplicationResult<()> {
        let repeated = !planned.insert(target.to_path_buf());
        if !overwrite && (repeated || self.fs.exists(target)) {
            return Err(ApplicationError::TargetExists(target.to_path_buf()));
        }
        Ok(())
    }

    fn confirm(&self, user_prompt: bool, question: &str, target: &Path) -> ApplicationResult<bool> {
        if !user_prompt {
            return Ok(true);
        }
        self.prompt
            .confirm(question)
            .with_path_context("confirm", target)
    }

    /// Carry out `plan`, reporting each action through `on_event`.
    ///
    /// In dry-run mode nothing is written and git is never invoked.
    pub fn execute(
        &self,
        plan: &PublishPlan,
        user_prompt: bool,
        dry_run: bool,
        on_event: &mut dyn FnMut(PublishEvent),
    ) -> ApplicationResult<PublishSummary> {
        let mut summary = PublishSummary::default();

        for copy in &plan.files {
            let question = format!("Create new file: {} (y/[n]):", copy.target.display());
            if !self.confirm(user_prompt, &question, &copy.target)? {
                summary.declined += 1;
                on_event(PublishEvent::Declined {
                    target: copy.target.clone(),
                });
                continue;
            }

            if dry_run {
                on_event(PublishEvent::WouldCreate {
                    source: copy.source.clone(),
                    target: copy.target.clone(),
                });
            } else {
                self.fs
                    .ensure_parent(&copy.target)
                    .with_path_context("create parent directory", &copy.target)?;
                let bytes = self
                    .fs
                    .copy(&copy.source, &copy.target)
                    .with_path_context("copy file", &copy.source)?;
                info!("copied {} bytes to {}", bytes, copy.target.display());
                on_event(PublishEvent::Created {
                    source: copy.source.clone(),
                    target: copy.target.clone(),
                });
            }
            summary.created += 1;
        }

        if let Some(archive) = &plan.archive {
            let target = archive.target().to_path_buf();
            let question = format!("Create archive file: {} (y/[n]):", target.display());
            if !self.confirm(user_prompt, &question, &target)? {
                on_event(PublishEvent::ArchiveDeclined { target });
            } else if dry_run {
                on_event(PublishEvent::ArchiveDryRun {
                    command: archive.command.to_string(),
                });
            } else {
                self.fs
                    .ensure_parent(&target)
                    .with_path_context("create parent directory", &target)?;
                self.git.archive(&archive.command)?;
                summary.archived = true;
                on_event(PublishEvent::ArchiveCreated { target });
            }
        }

        Ok(summary)
    }

    /// Plan and execute in one go.
    pub fn publish(
        &self,
        settings: &ResolvedSettings,
        version: &str,
        dry_run: bool,
        on_event: &mut dyn FnMut(PublishEvent),
    ) -> ApplicationResult<PublishSummary> {
        let plan = self.plan(settings, version)?;
        self.execute(&plan, settings.user_prompt, dry_run, on_event)
    }
}
