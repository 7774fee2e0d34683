use anyhow::Context;
use planguard_render::{
    RenderableData, RenderableDecision, RenderableError, RenderableOutcome, RenderableReport,
};
use planguard_types::{
    Outcome, PlanguardData, PlanguardReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolError,
    ToolMeta, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<PlanguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse planguard report")
}

pub fn serialize_report(report: &PlanguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &PlanguardReport) -> RenderableReport {
    RenderableReport {
        approval_required: report.approval_required,
        outcome: match report.outcome {
            Outcome::NoChanges => RenderableOutcome::NoChanges,
            Outcome::Evaluated => RenderableOutcome::Evaluated,
            Outcome::Error => RenderableOutcome::Error,
        },
        decisions: report
            .decisions
            .iter()
            .map(|d| RenderableDecision {
                line: d.line,
                resource_path: d.resource_path.clone(),
                resource_type: d.resource_type.clone(),
                action: d.action.as_str().to_string(),
                requires_approval: d.verdict.requires_approval(),
                matched: d.matched.as_str().to_string(),
                code: d.code.clone(),
                message: d.message.clone(),
            })
            .collect(),
        error: report.error.as_ref().map(|e| RenderableError {
            code: e.code.clone(),
            message: e.message.clone(),
            line: e.line,
        }),
        data: RenderableData {
            profile: report.data.profile.clone(),
            lines_total: report.data.lines_total,
            lines_evaluated: report.data.lines_evaluated,
            short_circuited: report.data.short_circuited,
        },
    }
}

/// Fail-safe report for errors outside evaluation (IO, config). Always requires approval.
pub fn runtime_error_report(message: &str) -> PlanguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "planguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        approval_required: true,
        outcome: Outcome::Error,
        decisions: Vec::new(),
        error: Some(ToolError {
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            line: None,
        }),
        data: PlanguardData {
            profile: "unknown".to_string(),
            ..PlanguardData::default()
        },
    }
}
