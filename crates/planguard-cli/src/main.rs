//! CLI entry point for planguard.
//!
//! This module is thin: it handles argument parsing, IO, logging setup, and exit codes.
//! All business logic lives in the `planguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use planguard_app::{
    EvaluateInput, ExplainOutput, parse_report_json, render_annotations, render_markdown,
    report_exit_code, run_evaluate, run_explain, runtime_error_report, serialize_report,
    to_renderable,
};
use planguard_render::{OutputFormat, render_output_variable};
use planguard_settings::Overrides;
use planguard_types::{PlanguardReport, ids};
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "planguard",
    version,
    about = "Approval gate for infrastructure plans"
)]
struct Cli {
    /// Path to planguard config TOML. A missing file is allowed (the preset applies).
    #[arg(long, default_value = "planguard.toml")]
    config: Utf8PathBuf,

    /// Override preset profile (empty|aws).
    #[arg(long)]
    profile: Option<String>,

    /// Log output format on stderr (text or json). Filter with RUST_LOG.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate rendered plan text and publish whether approval is required.
    Evaluate {
        /// Plan text file (`terraform show -no-color` output), or `-` for stdin.
        #[arg(long, default_value = "-")]
        plan: Utf8PathBuf,

        /// Treat a resource type as always unsafe (repeatable).
        #[arg(long = "unsafe", value_name = "TYPE")]
        unsafe_types: Vec<String>,

        /// Treat a resource type as always safe (repeatable).
        #[arg(long = "safe", value_name = "TYPE")]
        safe_types: Vec<String>,

        /// How to publish the result: plain, github, azure, or none.
        #[arg(long, default_value = "plain", value_parser = parse_output_format)]
        output_format: OutputFormat,

        /// Name of the published output variable.
        #[arg(long, default_value = ids::DEFAULT_OUTPUT_NAME)]
        output_name: String,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Write a Markdown summary.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown summary (if enabled).
        #[arg(long, default_value = "artifacts/planguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/planguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/planguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "plan.approval_gate") or code (e.g. "malformed_line").
        identifier: String,
    },
}

/// Publishing settings for the approval flag.
struct Publish {
    format: OutputFormat,
    name: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match cli.cmd {
        Commands::Evaluate {
            ref plan,
            ref unsafe_types,
            ref safe_types,
            output_format,
            ref output_name,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                profile: cli.profile.clone(),
                always_unsafe: unsafe_types.clone(),
                always_safe: safe_types.clone(),
            };
            let publish = Publish {
                format: output_format,
                name: output_name.clone(),
            };
            let markdown_out = write_markdown.then_some(markdown_out.as_path());
            cmd_evaluate(
                &cli.config,
                plan,
                overrides,
                &publish,
                report_out.as_deref(),
                markdown_out,
            )
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(log_format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing: {err}"))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing: {err}"))?,
    }

    Ok(())
}

fn parse_output_format(v: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(v)
        .ok_or_else(|| format!("unknown output format: {v} (expected plain|github|azure|none)"))
}

fn cmd_evaluate(
    config_path: &Utf8Path,
    plan_path: &Utf8Path,
    overrides: Overrides,
    publish: &Publish,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let plan_text = read_plan(plan_path)?;
        let config_text = read_config(config_path)?;

        let input = EvaluateInput {
            plan_text: &plan_text,
            config_text: &config_text,
            overrides,
        };
        let output = run_evaluate(input)?;
        let report = &output.report;

        tracing::info!(
            approval_required = report.approval_required,
            profile = %report.data.profile,
            lines_total = report.data.lines_total,
            lines_evaluated = report.data.lines_evaluated,
            "evaluation finished"
        );

        write_artifacts(report, report_out, markdown_out)?;
        publish_approval(publish, report.approval_required).context("publish output variable")?;

        Ok(report_exit_code(report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_artifacts(&report, report_out, markdown_out) {
                tracing::error!("write fail-safe report: {write_err:#}");
            }
            if let Err(publish_err) = publish_approval(publish, true) {
                tracing::error!("publish output variable: {publish_err:#}");
            }
            eprintln!("planguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_plan(path: &Utf8Path) -> anyhow::Result<String> {
    if path.as_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("read plan from stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("read plan: {path}"))
}

/// Config text, or an empty string when the file does not exist.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using preset only");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn write_artifacts(
    report: &PlanguardReport,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    if let Some(path) = report_out {
        write_report_file(path, report).context("write report json")?;
    }
    if let Some(path) = markdown_out {
        let md = render_markdown(&to_renderable(report));
        write_text_file(path, &md).context("write markdown")?;
    }
    Ok(())
}

/// Publish the approval flag. GitHub output falls back to stdout when `GITHUB_OUTPUT` is unset.
fn publish_approval(publish: &Publish, approval_required: bool) -> anyhow::Result<()> {
    let Some(line) = render_output_variable(publish.format, &publish.name, approval_required)
    else {
        return Ok(());
    };

    if publish.format == OutputFormat::Github
        && let Some(path) = std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty())
    {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open GITHUB_OUTPUT: {}", path.to_string_lossy()))?;
        writeln!(file, "{line}").context("append to GITHUB_OUTPUT")?;
        return Ok(());
    }

    println!("{line}");
    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &PlanguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", planguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                planguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
