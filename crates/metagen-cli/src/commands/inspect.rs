//! Implementation of the `metagen inspect` command.
//!
//! Builds the directive registry and resolves triples exactly as a
//! generation round would, then prints them without rendering anything.

use serde::Serialize;
use tracing::{instrument, warn};

use metagen_adapters::ManifestHost;
use metagen_core::{
    application::{Discovery, resolve},
    domain::DirectiveRegistry,
};

use crate::{
    cli::{InspectArgs, InspectFormat},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Report {
    markers: Vec<MarkerView>,
    triples: Vec<TripleView>,
    rejected: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MarkerView {
    name: String,
    extends: Vec<String>,
    directives: Vec<DirectiveView>,
}

#[derive(Debug, Serialize)]
struct DirectiveView {
    class_name: String,
    template: String,
}

#[derive(Debug, Serialize)]
struct TripleView {
    marker: String,
    element: String,
    metadata: String,
    class_name: String,
    template: String,
}

#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn execute(args: InspectArgs, output: OutputManager) -> CliResult<()> {
    let host = ManifestHost::load(&args.manifest)?;
    let report = build_report(&host);

    match args.format {
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .with_cli_context(|| "serialising inspection report")?;
            output.data(&json)?;
        }
        InspectFormat::Table => print_table(&report, &output)?,
    }
    Ok(())
}

fn build_report(host: &ManifestHost) -> Report {
    let mut registry = DirectiveRegistry::new();
    let mut rejected = Vec::new();
    for declaration in host.directive_declarations() {
        let marker = declaration.marker().name().clone();
        if let Err(e) = registry.declare(declaration) {
            warn!(marker = %marker, error = %e, "Rejected directive declaration");
            rejected.push(format!("{marker}: {e}"));
        }
    }

    let markers = host
        .markers()
        .iter()
        .map(|declared| MarkerView {
            name: declared.marker.name().to_string(),
            extends: declared.extends.iter().map(ToString::to_string).collect(),
            directives: registry
                .get(declared.marker.name())
                .map(|entry| {
                    entry
                        .directives
                        .iter()
                        .map(|d| DirectiveView {
                            class_name: d.class_name_template.clone(),
                            template: d.template.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();

    let triples = resolve(&registry, host, host)
        .into_iter()
        .map(|r| TripleView {
            marker: r.marker.name().to_string(),
            element: r.element.qualified_name().to_string(),
            metadata: r.metadata.to_string(),
            class_name: r.directive.class_name_template.clone(),
            template: r.directive.template.clone(),
        })
        .collect();

    Report {
        markers,
        triples,
        rejected,
    }
}

fn print_table(report: &Report, output: &OutputManager) -> CliResult<()> {
    output.header("Markers:")?;
    for marker in &report.markers {
        let extends = if marker.extends.is_empty() {
            String::new()
        } else {
            format!(" extends {}", marker.extends.join(", "))
        };
        output.print(&format!("  {}{extends}", marker.name))?;
        for d in &marker.directives {
            output.print(&format!("    {} <- {}", d.class_name, d.template))?;
        }
    }

    output.print("")?;
    output.header("Resolved:")?;
    if report.triples.is_empty() {
        output.print("  (none)")?;
    }
    for t in &report.triples {
        output.print(&format!(
            "  {} via {}: {} <- {}",
            t.element, t.metadata, t.class_name, t.template
        ))?;
    }

    for reason in &report.rejected {
        output.warning(&format!("Rejected {reason}"))?;
    }
    Ok(())
}
