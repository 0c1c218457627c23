//! Fakes for the I/O boundaries shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use publish::infrastructure::di::ServiceContainer;
use publish::infrastructure::traits::{
    CommandRunner, EnvReader, FileSystem, Prompter, RealFileSystem,
};

/// Scripted git: responses keyed by subcommand (`status`, `describe`, `archive`).
#[derive(Default)]
pub struct FakeCommandRunner {
    responses: Mutex<HashMap<String, (i32, String, String)>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean working tree, tagged at `tag`, archive succeeds.
    pub fn clean_repo(tag: &str) -> Self {
        Self::new()
            .respond("status", 0, "", "")
            .respond("describe", 0, &format!("{tag}\n"), "")
            .respond("archive", 0, "", "")
    }

    pub fn respond(self, subcommand: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.responses.lock().unwrap().insert(
            subcommand.to_string(),
            (code, stdout.to_string(), stderr.to_string()),
        );
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, subcommand: &str) -> bool {
        self.calls()
            .iter()
            .any(|c| c.get(1).map(String::as_str) == Some(subcommand))
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let mut call = vec![cmd.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.lock().unwrap().push(call);

        let subcommand = args.first().copied().unwrap_or_default();
        let responses = self.responses.lock().unwrap();
        let (code, stdout, stderr) = responses.get(subcommand).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no response for {subcommand}"))
        })?;

        Ok(Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: stdout.into_bytes(),
            stderr: stderr.into_bytes(),
        })
    }
}

/// Answers confirmations from a queue; an empty queue declines.
#[derive(Default)]
pub struct FakePrompter {
    answers: Mutex<VecDeque<bool>>,
    questions: Mutex<Vec<String>>,
}

impl FakePrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompter for FakePrompter {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

#[derive(Default)]
pub struct FakeEnv(pub HashMap<String, String>);

impl FakeEnv {
    pub fn with(key: &str, value: &str) -> Self {
        Self(HashMap::from([(key.to_string(), value.to_string())]))
    }

    pub fn and(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvReader for FakeEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Real filesystem, fake everything else.
pub fn container(
    cmd: Arc<FakeCommandRunner>,
    prompt: Arc<FakePrompter>,
    env: FakeEnv,
) -> ServiceContainer {
    ServiceContainer::with_deps(Arc::new(RealFileSystem), cmd, prompt, Arc::new(env))
}

pub fn real_fs() -> Arc<dyn FileSystem> {
    Arc::new(RealFileSystem)
}

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
