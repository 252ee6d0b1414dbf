//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No generation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "metagen",
    bin_name = "metagen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Metadata-driven source generation",
    long_about = "metagen reads marker declarations and annotated elements from a \
                  manifest and renders one source artifact per applicable \
                  generation directive.",
    after_help = "EXAMPLES:\n\
        \x20 metagen generate model.toml --templates templates --out src/generated\n\
        \x20 metagen generate model.toml --dry-run -v\n\
        \x20 metagen inspect model.toml --format json\n\
        \x20 metagen completions bash > /usr/share/bash-completion/completions/metagen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render every applicable directive in a manifest.
    #[command(
        visible_alias = "gen",
        about = "Generate artifacts from a manifest",
        after_help = "EXAMPLES:\n\
            \x20 metagen generate model.toml\n\
            \x20 metagen generate model.toml --templates tpl --out out --extension java"
    )]
    Generate(GenerateArgs),

    /// Show the registry and the resolved triples without rendering.
    #[command(
        about = "Inspect markers, directives, and resolved triples",
        after_help = "EXAMPLES:\n\
            \x20 metagen inspect model.toml\n\
            \x20 metagen inspect model.toml --format json"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 metagen completions bash > ~/.local/share/bash-completion/completions/metagen\n\
            \x20 metagen completions zsh  > ~/.zfunc/_metagen\n\
            \x20 metagen completions fish > ~/.config/fish/completions/metagen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(value_name = "MANIFEST", help = "Declaration manifest (TOML)")]
    pub manifest: PathBuf,

    /// Falls back to `generation.templates_dir` from the configuration.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Directory holding the named templates"
    )]
    pub templates: Option<PathBuf>,

    /// Falls back to `generation.output_dir` from the configuration.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory for generated artifacts"
    )]
    pub out: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        help = "File extension of generated artifacts"
    )]
    pub extension: Option<String>,

    /// Render everything but keep it in memory.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[arg(value_name = "MANIFEST", help = "Declaration manifest (TOML)")]
    pub manifest: PathBuf,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: InspectFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InspectFormat {
    Table,
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "metagen",
            "generate",
            "model.toml",
            "--templates",
            "tpl",
            "--out",
            "out",
            "--extension",
            "java",
            "--dry-run",
        ]);

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.manifest, PathBuf::from("model.toml"));
        assert_eq!(args.templates, Some(PathBuf::from("tpl")));
        assert_eq!(args.out, Some(PathBuf::from("out")));
        assert_eq!(args.extension.as_deref(), Some("java"));
        assert!(args.dry_run);
    }

    #[test]
    fn generate_alias_and_defaults() {
        let cli = Cli::parse_from(["metagen", "gen", "model.toml"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.templates.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["metagen", "inspect", "model.toml", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
        assert!(matches!(
            cli.command,
            Commands::Inspect(InspectArgs {
                format: InspectFormat::Table,
                ..
            })
        ));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["metagen", "-q", "-v", "inspect", "m.toml"]).is_err());
    }
}
