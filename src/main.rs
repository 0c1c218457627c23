use std::io;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Generator};
use publish::cli::{execute_command, output, Cli, CliError};
use publish::exitcode;
use publish::infrastructure::di::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn print_completions<G: Generator>(gen: G) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(gen, &mut cmd, name, &mut io::stdout());
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        eprintln!("Generating completion file for {shell:?}...");
        print_completions(shell);
        process::exit(exitcode::OK);
    }

    setup_logging(cli.debug);

    let container = ServiceContainer::new();
    match execute_command(&cli, &container) {
        Ok(()) => process::exit(exitcode::OK),
        // propagate unhandled: Rust prints the debug form and exits 1
        Err(e) if cli.raise => Err(e),
        Err(e) => {
            output::error_banner(&e);
            process::exit(exitcode::FAILURE);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // RUST_LOG wins over -d when set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(filter.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
