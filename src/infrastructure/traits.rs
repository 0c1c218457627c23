//! Boundary traits for everything a publish run touches outside the process
//!
//! Services hold these as `Arc<dyn _>`; tests swap in fakes for git, the
//! terminal and the environment.

use std::io;
use std::path::Path;
use std::process::Output;

/// Settings file and artifact access.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path`.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Byte-for-byte copy, replacing `to`. Returns bytes copied.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Make sure the directory that will hold `path` exists.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Runs external programs (git) to completion.
pub trait CommandRunner: Send + Sync {
    /// Captures stdout and stderr; a non-zero exit is not an `Err`.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Interactive yes/no confirmation.
pub trait Prompter: Send + Sync {
    /// Ask `question`; true only for an explicit affirmative answer.
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// Environment variable lookup.
pub trait EnvReader: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;

    /// All variables whose name starts with `prefix`.
    fn vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)>;
}

/// `y` or `yes`, any case. Everything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

// ============================================================
// process-backed implementations
// ============================================================

#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        std::fs::copy(from, to)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            // bare file name: current directory
            Some(parent) if !parent.as_os_str().is_empty() => self.create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Spawns via `std::process::Command`, inheriting the working directory.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Asks on stdout, reads one line from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        use colored::Colorize;
        use std::io::{BufRead, Write};

        print!("{} ", question.cyan());
        io::stdout().flush()?;

        let mut answer = String::new();
        // EOF reads zero bytes and declines
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Reads the process environment.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        // non-UTF-8 variables cannot hold a setting
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .filter(|(k, _)| k.starts_with(prefix))
            .collect()
    }
}
