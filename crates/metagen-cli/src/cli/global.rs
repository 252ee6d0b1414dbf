//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// More log output: -v info, -vv debug (resolution, class names), -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colors
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Settings file, applied over the defaults and under METAGEN__* variables
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How stdout is rendered; `json` prints a run summary for `generate`
    #[arg(long, global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Log level for the metagen crates. `--quiet` wins over any `-v`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise
    #[default]
    Auto,
    Human,
    Plain,
    /// Machine-readable run summary
    Json,
}
