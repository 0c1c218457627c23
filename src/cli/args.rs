//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

use crate::config::DEFAULT_SETTINGS_FILE;
use crate::domain::{CommonSettings, VersionSource};

/// Publish build artifacts to declared destinations
#[derive(Parser, Debug)]
#[command(name = "publish")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(group(
    ArgGroup::new("operation")
        .args(["validate_settings_only", "print_example_settings", "generate"])
        .multiple(false)
))]
pub struct Cli {
    /// Destination to publish to
    #[arg(default_value = "draft")]
    pub destination: String,

    /// Do not handle errors: return them unformatted from main
    #[arg(short = 'X', long)]
    pub raise: bool,

    /// Report what would be done without doing it
    #[arg(short = 'N', long)]
    pub dry_run: bool,

    /// Print the effective settings and where each value came from
    #[arg(short = 'P', long)]
    pub print_settings: bool,

    /// Settings file
    #[arg(short = 'S', long, default_value = DEFAULT_SETTINGS_FILE, value_hint = ValueHint::FilePath)]
    pub settings_file: PathBuf,

    /// Validate the settings file and exit
    #[arg(short = 'V', long)]
    pub validate_settings_only: bool,

    /// Print an example settings file and exit
    #[arg(short = 'E', long)]
    pub print_example_settings: bool,

    /// Write a settings template to the settings file
    #[arg(short = 'G', long)]
    pub generate: bool,

    /// Require being run from make
    #[arg(long, overrides_with = "no_ensure_make")]
    pub ensure_make: bool,
    /// Allow running outside make
    #[arg(long)]
    pub no_ensure_make: bool,

    /// Ask before creating each file
    #[arg(long, overrides_with = "no_user_prompt")]
    pub user_prompt: bool,
    /// Never ask before creating files
    #[arg(long)]
    pub no_user_prompt: bool,

    /// Proceed with a warning when the working tree is dirty
    #[arg(long, overrides_with = "no_git_allow_uncommitted")]
    pub git_allow_uncommitted: bool,
    /// Refuse to run when the working tree is dirty
    #[arg(long)]
    pub no_git_allow_uncommitted: bool,

    /// Allow replacing existing targets
    #[arg(short = 'o', long, overrides_with = "no_overwrite")]
    pub overwrite: bool,
    /// Fail when a target already exists
    #[arg(long)]
    pub no_overwrite: bool,

    /// Where the version string comes from
    #[arg(short = 'v', long, value_enum)]
    pub version: Option<VersionSource>,

    /// Version string for `--version user_supplied`
    #[arg(short = 'u', long)]
    pub user_version: Option<String>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

/// `Some(true)` for `--flag`, `Some(false)` for `--no-flag`, `None` for neither.
fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl Cli {
    /// The settings layer produced by command-line flags.
    pub fn overrides(&self) -> CommonSettings {
        CommonSettings {
            ensure_make: flag(self.ensure_make, self.no_ensure_make),
            user_prompt: flag(self.user_prompt, self.no_user_prompt),
            git_allow_uncommitted: flag(self.git_allow_uncommitted, self.no_git_allow_uncommitted),
            overwrite: flag(self.overwrite, self.no_overwrite),
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_args_when_parsed_then_defaults() {
        let cli = Cli::try_parse_from(["publish"]).unwrap();
        assert_eq!(cli.destination, "draft");
        assert_eq!(cli.settings_file, PathBuf::from(DEFAULT_SETTINGS_FILE));
        assert!(cli.overrides().is_empty());
    }

    #[test]
    fn given_override_flags_when_parsed_then_layer_set() {
        let cli = Cli::try_parse_from([
            "publish",
            "release",
            "-o",
            "--no-user-prompt",
            "-v",
            "user_supplied",
            "-u",
            "2.1",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(cli.destination, "release");
        assert_eq!(overrides.overwrite, Some(true));
        assert_eq!(overrides.user_prompt, Some(false));
        assert_eq!(overrides.version, Some(VersionSource::UserSupplied));
        assert_eq!(overrides.ensure_make, None);
        assert_eq!(cli.user_version.as_deref(), Some("2.1"));
    }

    #[test]
    fn given_later_negation_when_parsed_then_last_wins() {
        let cli = Cli::try_parse_from(["publish", "--overwrite", "--no-overwrite"]).unwrap();
        assert_eq!(cli.overrides().overwrite, Some(false));
    }

    #[test]
    fn given_help_when_rendered_then_every_negation_listed() {
        let help = Cli::command().render_long_help().to_string();
        for flag in [
            "--no-ensure-make",
            "--no-user-prompt",
            "--no-git-allow-uncommitted",
            "--no-overwrite",
        ] {
            assert!(help.contains(flag), "{flag} missing from help");
        }
    }

    #[test]
    fn given_two_operations_when_parsed_then_rejected() {
        assert!(Cli::try_parse_from(["publish", "-V", "-G"]).is_err());
        assert!(Cli::try_parse_from(["publish", "-E", "-V"]).is_err());
    }
}
