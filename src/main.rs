mod app;
mod config;
mod error;
mod filter;
mod format;
mod input;
mod model;
mod network;
mod scheduler;
mod table;
mod tui;

use std::{fs::File, process::ExitCode, sync::Arc};

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::app::App;
use crate::config::{Cli, Config};
use crate::error::{AppError, Result};
use crate::network::ProcNetSource;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error running program: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::try_from(cli)?;
    init_logging(cli)?;
    tracing::info!(?config, "Starting tcpwatch");

    let source = Arc::new(ProcNetSource::new(config.include_v6));
    let mut app = App::new(config, source);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    tracing::info!("Goodbye!");
    result
}

// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file).map_err(|e| {
        AppError::Config(format!("cannot open log file {}: {e}", cli.log_file.display()))
    })?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
    Ok(())
}
