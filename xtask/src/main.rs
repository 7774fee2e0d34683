//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return parent.to_path_buf();
    }
    manifest_dir
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(planguard_types::PlanguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(planguard_settings::PlanguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "planguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "planguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("  missing: {name}");
    }
    for name in &mismatched {
        eprintln!("  out of date: {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden fixtures against the generated schemas");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn compile(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

fn schema_errors(validator: &jsonschema::Validator, instance: &serde_json::Value) -> Vec<String> {
    validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect()
}

/// Check one fixture directory: its golden report and optional config must validate.
fn conform_fixture(
    dir: &Path,
    report_validator: &jsonschema::Validator,
    config_validator: &jsonschema::Validator,
) -> anyhow::Result<Vec<String>> {
    let mut errors = Vec::new();
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let report_path = dir.join("expected.report.json");
    let text = fs::read_to_string(&report_path)
        .with_context(|| format!("Failed to read {}", report_path.display()))?;
    let report: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", report_path.display()))?;
    let report = planguard_test_util::normalize_nondeterministic(report);

    if report.get("schema").and_then(|v| v.as_str()) != Some(planguard_types::SCHEMA_REPORT_V1) {
        errors.push(format!("{name}: expected.report.json has the wrong schema id"));
    }
    for err in schema_errors(report_validator, &report) {
        errors.push(format!("{name}: report: {err}"));
    }

    let config_path = dir.join("planguard.toml");
    if config_path.exists() {
        let text = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        match planguard_settings::parse_config_toml(&text) {
            Ok(cfg) => {
                let value = serde_json::to_value(&cfg).context("Failed to convert config")?;
                for err in schema_errors(config_validator, &value) {
                    errors.push(format!("{name}: config: {err}"));
                }
            }
            Err(err) => errors.push(format!("{name}: config: {err:#}")),
        }
    }

    Ok(errors)
}

/// Validate every golden fixture under tests/fixtures/ against the generated schemas.
fn conform() -> anyhow::Result<()> {
    let report_validator = compile(&generate_report_schema())?;
    let config_validator = compile(&generate_config_schema())?;
    println!("✓ report and config schemas compile");

    let dir = fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.join("expected.report.json").exists())
        .collect();
    entries.sort();

    if entries.is_empty() {
        bail!("no fixtures with expected.report.json under {}", dir.display());
    }

    let mut errors = Vec::new();
    for fixture in &entries {
        errors.extend(conform_fixture(fixture, &report_validator, &config_validator)?);
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("✓ {} fixtures conform", entries.len());
    println!("\n✓ All conformance checks passed!");
    Ok(())
}

fn check_explanation(kind: &str, id: &str, errors: &mut Vec<String>) {
    let Some(exp) = planguard_types::explain::lookup_explanation(id) else {
        errors.push(format!("{kind} '{id}' has no explanation"));
        return;
    };
    if exp.title.is_empty() {
        errors.push(format!("{kind} '{id}' has empty title"));
    }
    if exp.description.is_empty() {
        errors.push(format!("{kind} '{id}' has empty description"));
    }
    if exp.remediation.is_empty() {
        errors.push(format!("{kind} '{id}' has empty remediation"));
    }
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = planguard_types::explain::all_check_ids();
    let codes = planguard_types::explain::all_codes();

    let mut errors = Vec::new();
    for check_id in check_ids {
        check_explanation("Check ID", check_id, &mut errors);
    }
    for code in codes {
        check_explanation("Code", code, &mut errors);
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
