mod cli;
mod replay;

use std::process::ExitCode;

use pylon_common::PylonError;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;
use crate::replay::ReplayOptions;

fn run(command: Command) -> Result<(), PylonError> {
    match command {
        Command::Shell {
            config,
            channel,
            nonce,
        } => {
            let session = pylon_config::load_from_path(&config)?;
            let html = pylon_webview::render_shell(&session, channel.into(), nonce.as_deref());
            print!("{html}");
        }
        Command::Replay {
            config,
            trace,
            probe,
            rn_density,
        } => {
            let session = pylon_config::load_from_path(&config)?;
            let trace = std::fs::read_to_string(&trace)?;
            let options = ReplayOptions {
                probes: probe,
                rn_density,
            };
            print!("{}", replay::replay(session, &trace, &options)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Logs go to stderr; stdout carries the shell or replay report.
    let log_directive = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap()),
            ),
        )
        .init();

    tracing::debug!("pylon v{} starting", env!("CARGO_PKG_VERSION"));

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
