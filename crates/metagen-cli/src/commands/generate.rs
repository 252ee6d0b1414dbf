//! Implementation of the `metagen generate` command.
//!
//! Responsibility: wire the manifest host, template engine, filer, and
//! messager into a `GenerationService`, run one round, and report. No
//! generation logic lives here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use metagen_adapters::{DirectoryFiler, MustacheEngine, ManifestHost, MemoryFiler};
use metagen_core::{
    application::{Filer, GenerationService, Messager, RoundReport},
    domain::QualifiedName,
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Where the run's artifacts go, after CLI flags and config are merged.
#[derive(Debug)]
struct Plan {
    templates: PathBuf,
    templates_explicit: bool,
    out: PathBuf,
    extension: String,
}

impl Plan {
    fn new(args: &GenerateArgs, config: &AppConfig) -> Self {
        Self {
            templates: args
                .templates
                .clone()
                .unwrap_or_else(|| config.generation.templates_dir.clone()),
            templates_explicit: args.templates.is_some(),
            out: args
                .out
                .clone()
                .unwrap_or_else(|| config.generation.output_dir.clone()),
            extension: args
                .extension
                .clone()
                .unwrap_or_else(|| config.generation.extension.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    manifest: &'a str,
    dry_run: bool,
    resolved: usize,
    generated: &'a [String],
    errors: usize,
}

/// Execute the `metagen generate` command.
///
/// 1. Load and validate the manifest
/// 2. Register the templates directory
/// 3. Run one round against a directory (or in-memory) filer
/// 4. Flush errors and print the summary
#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let plan = Plan::new(&args, &config);
    debug!(?plan, "Generation plan");

    // 1. Manifest
    let host = ManifestHost::load(&args.manifest)?;
    info!(
        markers = host.markers().len(),
        elements = host.elements().len(),
        "Manifest loaded"
    );

    // 2. Templates
    let engine = load_templates(&plan, &output)?;

    // 3. Round
    let memory = MemoryFiler::new();
    let directory = DirectoryFiler::new(&plan.out, &plan.extension);
    let filer: Box<dyn Filer> = if args.dry_run {
        Box::new(memory.clone())
    } else {
        Box::new(directory.clone())
    };

    let messager: Box<dyn Messager> = Box::new(output.messager());
    let mut service = GenerationService::new(Box::new(engine), filer, messager);
    let report = service.process_round(&host, &host);
    let errors = service.finish();

    // 4. Summary
    if output.format() == OutputFormat::Json {
        let manifest = args.manifest.display().to_string();
        let summary = Summary {
            manifest: &manifest,
            dry_run: args.dry_run,
            resolved: report.resolved,
            generated: &report.generated,
            errors,
        };
        let json = serde_json::to_string_pretty(&summary)
            .with_cli_context(|| "serialising generation summary")?;
        output.data(&json)?;
    } else if args.dry_run {
        print_dry_run(&report, &memory, &directory, &output)?;
    } else {
        print_written(&report, &directory, &output)?;
    }

    if errors > 0 {
        return Err(CliError::GenerationFailed { errors });
    }
    Ok(())
}

fn load_templates(plan: &Plan, output: &OutputManager) -> CliResult<MustacheEngine> {
    if !plan.templates.is_dir() && !plan.templates_explicit {
        // Defaulted location: run with no named templates and let each
        // directive report what it is missing.
        warn!(dir = %plan.templates.display(), "Default templates directory not found");
        output.warning(&format!(
            "Templates directory '{}' not found; no named templates registered",
            plan.templates.display()
        ))?;
        return Ok(MustacheEngine::new());
    }

    let engine = MustacheEngine::from_dir(&plan.templates)?;
    debug!(templates = ?engine.template_names(), "Templates registered");
    Ok(engine)
}

fn print_written(
    report: &RoundReport,
    directory: &DirectoryFiler,
    output: &OutputManager,
) -> CliResult<()> {
    for path in directory.written() {
        output.print(&format!("  {}", path.display()))?;
    }

    let count = report.generated.len();
    if count > 0 {
        output.success(&format!(
            "Generated {count} artifact(s) under {}",
            directory.root().display()
        ))?;
    } else if report.resolved == 0 {
        output.info("No applicable directives found")?;
    }
    Ok(())
}

fn print_dry_run(
    report: &RoundReport,
    memory: &MemoryFiler,
    directory: &DirectoryFiler,
    output: &OutputManager,
) -> CliResult<()> {
    output.info(&format!(
        "Dry run: {} artifact(s) would be written",
        report.generated.len()
    ))?;

    for name in memory.names() {
        let origin = memory.origin_of(&name).unwrap_or_default();
        match QualifiedName::try_new(name.as_str()) {
            Ok(qualified) => {
                let path = directory.path_for(&qualified);
                output.print(&format!("  {name} -> {} (from {origin})", path.display()))?;
            }
            Err(e) => output.warning(&format!("{name} (from {origin}) has no output path: {e}"))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            manifest: PathBuf::from("model.toml"),
            templates: None,
            out: None,
            extension: None,
            dry_run: false,
        }
    }

    #[test]
    fn plan_falls_back_to_config() {
        let plan = Plan::new(&args(), &AppConfig::default());
        assert_eq!(plan.templates, PathBuf::from("templates"));
        assert_eq!(plan.out, PathBuf::from("generated"));
        assert_eq!(plan.extension, "java");
        assert!(!plan.templates_explicit);
    }

    #[test]
    fn flags_override_config() {
        let mut args = args();
        args.templates = Some(PathBuf::from("tpl"));
        args.extension = Some("kt".into());

        let plan = Plan::new(&args, &AppConfig::default());
        assert_eq!(plan.templates, PathBuf::from("tpl"));
        assert_eq!(plan.extension, "kt");
        assert!(plan.templates_explicit);
    }
}
