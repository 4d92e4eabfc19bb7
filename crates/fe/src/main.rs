//! Binary entrypoint for fe: global hotkeys and tray actions from a JSON file.
use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use logging::{self as logshared, LogBuffer};
use tracing_subscriber::{fmt, prelude::*};

/// Windows daemon: session, tray and message pump.
#[cfg(windows)]
mod app;
/// The `check` subcommand.
mod check;
/// Tray menu layout and commands.
#[cfg(any(windows, test))]
mod menu;
#[cfg(windows)]
mod tray;
/// Text shown by the Log and List commands.
#[cfg(any(windows, test))]
mod views;

#[derive(Parser, Debug)]
#[command(
    name = "fe",
    about = "Global hotkeys and tray actions from a JSON file",
    version
)]
/// Command-line interface for the `fe` binary.
struct Cli {
    /// Optional subcommand.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,

    /// Path to the config file (defaults to the executable path with a .json extension)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Editor started by the Edit command; the quoted config path is appended
    #[arg(long, value_name = "CMD", default_value = fe_engine::DEFAULT_EDITOR)]
    editor: String,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load the configuration, report how each entry is read, then exit.
    Check {
        /// Path to the configuration file to check
        path: Option<PathBuf>,

        /// Dump the parsed configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let env_filter = logshared::env_filter_from_spec(&cli.log.spec());
    // Everything logged is also kept for the Log command.
    let logs = LogBuffer::new();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time())
        .with(logs.layer())
        .try_init()
        .ok();

    if let Some(Command::Check { path, dump }) = &cli.command {
        let explicit = path.as_deref().or(cli.config.as_deref());
        let resolved = config::resolve_config_path(explicit);
        process::exit(check::run(&resolved, *dump));
    }

    let config_path = config::resolve_config_path(cli.config.as_deref());
    process::exit(run_daemon(config_path, cli.editor, logs));
}

/// Run the tray daemon until Exit; returns the process exit status.
#[cfg(windows)]
fn run_daemon(config_path: PathBuf, editor: String, logs: LogBuffer) -> i32 {
    app::run(
        fe_engine::SessionOptions {
            config_path,
            editor,
        },
        logs,
    )
}

/// The daemon needs the Win32 hotkey and tray facilities.
#[cfg(not(windows))]
fn run_daemon(config_path: PathBuf, _editor: String, _logs: LogBuffer) -> i32 {
    tracing::error!(
        "the fe daemon runs on Windows only; `fe check {}` works everywhere",
        config_path.display()
    );
    1
}
