//! `metagen`: render source artifacts from a declaration manifest.
//!
//! Exit status is taken from the error category:
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! |  0   | Success                                      |
//! |  1   | Generation error reported, or internal error |
//! |  2   | Invalid arguments or manifest                |
//! |  3   | Resource not found                           |
//! |  4   | Configuration error                          |

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Also the path for --help and --version, which print to stdout.
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("metagen: {e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    match start(cli) {
        Ok(()) => {
            info!("metagen finished");
            ExitCode::SUCCESS
        }
        Err(e) => report(e, verbose),
    }
}

fn start(cli: Cli) -> CliResult<()> {
    debug!(global = ?cli.global, "Arguments parsed");

    let config = AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: Some(e.into()),
    })?;
    let output = OutputManager::new(&cli.global, &config);

    dispatch(cli.command, config, output)
}

#[instrument(skip_all)]
fn dispatch(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Inspect(args) => commands::inspect::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Log `err`, print it to stderr and map it to its exit code.
fn report(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let message = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{message}");

    ExitCode::from(err.exit_code())
}
