//! End-to-end generation runs: manifest host + mustache engine + in-memory filer.

use metagen_adapters::{CollectingMessager, MustacheEngine, ManifestHost, MemoryFiler};
use metagen_core::prelude::*;
use pretty_assertions::assert_eq;

struct Run {
    filer: MemoryFiler,
    messager: CollectingMessager,
    report: RoundReport,
    errors: usize,
}

fn run(manifest: &str, templates: &[(&str, &str)]) -> Run {
    let host: ManifestHost = manifest.parse().unwrap();

    let mut engine = MustacheEngine::new();
    for (name, source) in templates {
        engine.register(name, source).unwrap();
    }

    let filer = MemoryFiler::new();
    let messager = CollectingMessager::new();
    let mut service = GenerationService::new(
        Box::new(engine),
        Box::new(filer.clone()),
        Box::new(messager.clone()),
    );

    let report = service.process_round(&host, &host);
    let errors = service.finish();

    Run {
        filer,
        messager,
        report,
        errors,
    }
}

#[test]
fn single_marker_produces_named_artifact() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{name}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Spec", values = { name = "Widget" } }]
"#;

    let run = run(manifest, &[("impl.mustache", "class {{this.class}} {}")]);

    assert_eq!(run.errors, 0);
    assert_eq!(run.filer.names(), vec!["app.WidgetImpl".to_string()]);
    assert_eq!(run.filer.read("app.WidgetImpl").as_deref(), Some("class WidgetImpl {}"));
    assert_eq!(run.filer.origin_of("app.WidgetImpl").as_deref(), Some("app.Base"));

    let notes = run.messager.texts(Severity::Note);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("from impl.mustache template"), "{}", notes[0]);
}

#[test]
fn type_sequences_render_in_order() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{annotated}}Types", template = "types.mustache" }

[[elements]]
package = "app"
name = "Base"

  [[elements.metadata]]
  marker = "app.Spec"
  values = { types = [{ type = "pkg.A" }, { type = "pkg.B[]" }] }
"#;

    let run = run(
        manifest,
        &[("types.mustache", "{{#types}}{{.}};{{/types}}")],
    );

    assert_eq!(run.errors, 0);
    assert_eq!(run.filer.read("app.BaseTypes").as_deref(), Some("pkg.A;pkg.B[];"));
}

#[test]
fn unsupported_value_fails_only_its_triple() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{annotated}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Broken"
metadata = [{ marker = "app.Spec", values = { handle = { pointer = 7 } } }]

[[elements]]
package = "app"
name = "Fine"
metadata = [{ marker = "app.Spec", values = { name = "ok" } }]
"#;

    let run = run(manifest, &[("impl.mustache", "class {{this.class}} {}")]);

    assert_eq!(run.report.resolved, 2);
    assert_eq!(run.errors, 1);
    assert_eq!(run.filer.names(), vec!["app.FineImpl".to_string()]);

    let errors = run.messager.texts(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("'handle'"), "{}", errors[0]);
}

#[test]
fn refined_marker_triggers_parent_directive() {
    let manifest = r#"
[[markers]]
name = "app.Entity"
generates = { class_name = "{{annotated}}Repository", template = "repo.mustache" }

[[markers]]
name = "app.Aggregate"
extends = ["app.Entity"]

[[elements]]
package = "app.model"
name = "Order"
metadata = [{ marker = "app.Aggregate", values = { table = "orders" } }]
"#;

    let run = run(
        manifest,
        &[("repo.mustache", "package {{this.package}};\nclass {{this.class}} /* {{table}} */ {}")],
    );

    assert_eq!(run.errors, 0);
    assert_eq!(
        run.filer.read("app.model.OrderRepository").as_deref(),
        Some("package app.model;\nclass OrderRepository /* orders */ {}")
    );
}

#[test]
fn one_marker_fans_out_to_every_directive() {
    let manifest = r#"
[[markers]]
name = "app.Spec"

  [[markers.directives]]
  class_name = "{{name}}Impl"
  template = "impl.mustache"

  [[markers.directives]]
  class_name = "{{name}}Test"
  template = "test.mustache"

[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Spec", values = { name = "Widget" } }]
"#;

    let run = run(
        manifest,
        &[("impl.mustache", "impl {{this.class}}"), ("test.mustache", "test {{this.class}}")],
    );

    assert_eq!(
        run.report.generated,
        vec!["app.WidgetImpl".to_string(), "app.WidgetTest".to_string()]
    );
    assert_eq!(run.filer.read("app.WidgetTest").as_deref(), Some("test WidgetTest"));
}

#[test]
fn colliding_names_keep_the_first_artifact() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{name}}", template = "impl.mustache" }

[[elements]]
package = "app"
name = "First"
metadata = [{ marker = "app.Spec", values = { name = "Same" } }]

[[elements]]
package = "app"
name = "Second"
metadata = [{ marker = "app.Spec", values = { name = "Same" } }]
"#;

    let run = run(manifest, &[("impl.mustache", "from {{annotated}}")]);

    assert_eq!(run.errors, 1);
    assert_eq!(run.filer.read("app.Same").as_deref(), Some("from First"));
    assert!(run.messager.texts(Severity::Error)[0].contains("already generated"));
}

#[test]
fn regeneration_is_deterministic() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{name}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Spec", values = { name = "Widget", tags = ["a", "b"], color = { enum = "app.Color.RED" } } }]
"#;
    let templates = [("impl.mustache", "class {{this.class}} {{color}} {{#tags}}{{.}}{{/tags}}")];

    let first = run(manifest, &templates);
    let second = run(manifest, &templates);

    assert_eq!(first.filer.read("app.WidgetImpl"), second.filer.read("app.WidgetImpl"));
    assert_eq!(first.filer.read("app.WidgetImpl").as_deref(), Some("class WidgetImpl RED ab"));
}

#[test]
fn sections_reach_outer_names_and_this_frame() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{name}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Spec", values = { name = "Widget", types = [{ type = "pkg.A" }, { type = "pkg.B" }] } }]
"#;

    let run = run(
        manifest,
        &[(
            "impl.mustache",
            "{{#types}}{{.}}:{{name}}:{{this.class}}:{{package}};{{/types}}",
        )],
    );

    assert_eq!(run.errors, 0);
    assert_eq!(
        run.filer.read("app.WidgetImpl").as_deref(),
        Some("pkg.A:Widget:WidgetImpl:app;pkg.B:Widget:WidgetImpl:app;")
    );
}

#[test]
fn attribute_named_class_does_not_hijack_this_class() {
    let manifest = r#"
[[markers]]
name = "app.Spec"
generates = { class_name = "{{annotated}}Impl", template = "impl.mustache" }

[[elements]]
package = "app"
name = "Base"
metadata = [{ marker = "app.Spec", values = { class = "Shadow" } }]
"#;

    let run = run(manifest, &[("impl.mustache", "class {{this.class}} /* {{class}} */")]);

    assert_eq!(run.errors, 0);
    assert_eq!(
        run.filer.read("app.BaseImpl").as_deref(),
        Some("class BaseImpl /* Shadow */")
    );
}
