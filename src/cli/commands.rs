//! Command dispatch
//!
//! One run: `load → resolve → preflight → version → plan → copy/archive`.
//! Operation flags (`-E`, `-V`, `-G`) and `-P` stop early.

use tracing::{info, instrument};

use crate::application::services::{GenerateOutcome, PublishEvent, SettingsService};
use crate::cli::{output, Cli, CliResult};
use crate::config::{env_overrides, to_toml, ARGS_LAYER, ENV_LAYER};
use crate::domain::{resolve, ResolvedSettings, SettingsLayer};
use crate::infrastructure::di::ServiceContainer;

#[instrument(skip_all, fields(destination = %cli.destination))]
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let settings_service = container.settings_service();

    if cli.print_example_settings {
        return print_example(&settings_service);
    }
    if cli.validate_settings_only {
        return validate(cli, &settings_service);
    }
    if cli.generate {
        return generate(cli, &settings_service);
    }

    let settings = resolve_settings(cli, container)?;
    if cli.print_settings {
        return print_settings(&settings);
    }

    publish(cli, container, &settings).map_err(|e| e.with_provenance(|key| settings.set_by(key)))
}

/// Load the settings file and merge all layers for the chosen destination.
pub fn resolve_settings(cli: &Cli, container: &ServiceContainer) -> CliResult<ResolvedSettings> {
    let file = container.settings_service().load(&cli.settings_file)?;
    let origin = cli.settings_file.display().to_string();
    let overrides = [
        SettingsLayer::new(ENV_LAYER, env_overrides(container.env.as_ref())?),
        SettingsLayer::new(ARGS_LAYER, cli.overrides()),
    ];
    Ok(resolve(&file, &origin, &cli.destination, &overrides)?)
}

fn print_example(service: &SettingsService) -> CliResult<()> {
    output::info(service.example()?);
    Ok(())
}

fn validate(cli: &Cli, service: &SettingsService) -> CliResult<()> {
    let settings = service.load(&cli.settings_file)?;
    output::success("Settings file is valid");
    output::detail(&format!(
        "destinations: {}",
        settings.destination_names().join(", ")
    ));
    Ok(())
}

fn generate(cli: &Cli, service: &SettingsService) -> CliResult<()> {
    match service.generate(&cli.settings_file)? {
        GenerateOutcome::Written => {
            output::success(&format!("Written \"{}\"", cli.settings_file.display()))
        }
        GenerateOutcome::Declined => output::info("Not writing"),
    }
    Ok(())
}

fn print_settings(settings: &ResolvedSettings) -> CliResult<()> {
    output::header("Full settings");
    output::info(&to_toml(settings)?);
    output::header("Settings set by");
    for (key, layer) in settings.provenance.iter() {
        output::detail(&format!("{key}: {layer}"));
    }
    Ok(())
}

fn publish(cli: &Cli, container: &ServiceContainer, settings: &ResolvedSettings) -> CliResult<()> {
    let report = container.preflight_service().check(settings)?;
    if let Some(status) = report.uncommitted {
        output::warning("Uncommitted changes");
        output::info(status.trim_end());
    }

    let version = container
        .version_service()
        .resolve(settings.version, cli.user_version.as_deref())?;
    info!(
        "publishing to {} at version {} (dry_run={})",
        settings.destination, version, cli.dry_run
    );

    let summary =
        container
            .publish_service()
            .publish(settings, &version, cli.dry_run, &mut report_event)?;
    info!(
        "created={}, declined={}, archived={}",
        summary.created, summary.declined, summary.archived
    );
    Ok(())
}

fn report_event(event: PublishEvent) {
    match event {
        PublishEvent::Created { target, .. } => output::action("Created file", &target.display()),
        PublishEvent::WouldCreate { source, target } => output::action(
            "Would create file",
            &format!("{} (from {})", target.display(), source.display()),
        ),
        PublishEvent::Declined { target } | PublishEvent::ArchiveDeclined { target } => {
            output::skipped("Not created", &target.display())
        }
        PublishEvent::ArchiveCreated { target } => {
            output::action("Created archive", &target.display())
        }
        PublishEvent::ArchiveDryRun { command } => output::info(&command),
    }
}
