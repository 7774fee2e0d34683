//! The `evaluate` use case: resolve policy, evaluate plan text, and produce a report.

use anyhow::Context;
use planguard_domain::{EvaluationFailure, report::EvaluationResult};
use planguard_settings::{Overrides, ResolvedConfig};
use planguard_types::{
    Outcome, PlanguardData, PlanguardReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolError,
    ToolMeta,
};
use time::OffsetDateTime;

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Rendered plan text.
    pub plan_text: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    pub report: PlanguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the evaluate use case.
///
/// Config problems are returned as errors. An aborted evaluation is not an error here: it
/// produces a report with `outcome = error` and `approval_required = true`.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, the preset applies).
    let cfg = if input.config_text.trim().is_empty() {
        planguard_settings::PlanguardConfigV1::default()
    } else {
        planguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = planguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;

    tracing::debug!(
        profile = %effective.profile,
        unsafe_types = effective.policy.always_unsafe.len(),
        safe_types = effective.policy.always_safe.len(),
        "resolved policy"
    );

    let mut data = PlanguardData {
        profile: effective.profile.clone(),
        unsafe_types: effective.policy.always_unsafe.len() as u32,
        safe_types: effective.policy.always_safe.len() as u32,
        ..PlanguardData::default()
    };

    let (approval_required, outcome, decisions, error) =
        match planguard_domain::evaluate_text(input.plan_text, effective) {
            Ok(result) => {
                fill_from_result(&mut data, &result);
                (result.approval_required, result.outcome, result.decisions, None)
            }
            Err(failure) => {
                let EvaluationFailure {
                    error,
                    decisions,
                    lines_total,
                } = failure;
                data.lines_total = lines_total;
                data.lines_evaluated = decisions.len() as u32;
                let tool_error = ToolError {
                    code: error.code().to_string(),
                    message: error.to_string(),
                    line: Some(error.line()),
                };
                (true, Outcome::Error, decisions, Some(tool_error))
            }
        };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "planguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        approval_required,
        outcome,
        decisions,
        error,
        data,
    };

    Ok(EvaluateOutput {
        report,
        resolved_config: resolved,
    })
}

fn fill_from_result(data: &mut PlanguardData, result: &EvaluationResult) {
    data.lines_total = result.lines_total;
    data.lines_evaluated = result.lines_evaluated();
    data.short_circuited = result.short_circuited;
    data.summary = result.summary;
}

/// Map a report to the process exit code: 0 when a verdict was determined, 1 otherwise.
pub fn report_exit_code(report: &PlanguardReport) -> i32 {
    match report.outcome {
        Outcome::NoChanges | Outcome::Evaluated => 0,
        Outcome::Error => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planguard_types::{PolicyMatch, Verdict, ids};

    const PLAN: &str = "\
Terraform will perform the following actions:

  # aws_instance.web will be updated in-place
  ~ resource \"aws_instance\" \"web\" {
    }

  # aws_db_instance.main will be destroyed
  - resource \"aws_db_instance\" \"main\" {
    }

  # aws_s3_bucket.logs must be replaced
-/+ resource \"aws_s3_bucket\" \"logs\" {
    }

Plan: 1 to add, 1 to change, 2 to destroy.
";

    fn input<'a>(plan_text: &'a str, config_text: &'a str) -> EvaluateInput<'a> {
        EvaluateInput {
            plan_text,
            config_text,
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn empty_config_uses_empty_profile() {
        let output = run_evaluate(input(PLAN, "")).unwrap();
        assert_eq!(output.resolved_config.effective.profile, "empty");
        assert_eq!(output.report.data.profile, "empty");
        assert_eq!(output.report.data.unsafe_types, 0);
    }

    #[test]
    fn aws_profile_stops_at_database_destroy() {
        let output = run_evaluate(input(PLAN, "profile = \"aws\"\n")).unwrap();
        let report = &output.report;

        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert!(report.approval_required);
        assert_eq!(report.outcome, Outcome::Evaluated);
        assert!(report.error.is_none());

        // aws_instance is always unsafe in the aws preset, so the first line already stops.
        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].line, 3);
        assert_eq!(report.decisions[0].matched, PolicyMatch::AlwaysUnsafe);
        assert_eq!(report.data.lines_total, 3);
        assert_eq!(report.data.lines_evaluated, 1);
        assert!(report.data.short_circuited);
        assert_eq!(report.data.summary.map(|s| s.destroy), Some(2));
        assert_eq!(report_exit_code(report), 0);
    }

    #[test]
    fn overrides_reclassify_types() {
        let output = run_evaluate(EvaluateInput {
            plan_text: PLAN,
            config_text: "",
            overrides: Overrides {
                profile: None,
                always_unsafe: vec![],
                always_safe: vec!["aws_db_instance".to_string(), "aws_s3_bucket".to_string()],
            },
        })
        .unwrap();

        let report = &output.report;
        assert!(!report.approval_required);
        assert_eq!(report.decisions.len(), 3);
        assert!(
            report
                .decisions
                .iter()
                .all(|d| d.verdict == Verdict::NoApproval)
        );
    }

    #[test]
    fn zero_change_plan_reports_no_changes() {
        let output = run_evaluate(input(
            "No changes. Your infrastructure matches the configuration.\n",
            "",
        ))
        .unwrap();
        assert!(!output.report.approval_required);
        assert_eq!(output.report.outcome, Outcome::NoChanges);
        assert!(output.report.decisions.is_empty());
    }

    #[test]
    fn malformed_line_becomes_error_report() {
        let plan = "  # aws_instance.a will be created\n  # will be destroyed\n";
        let output = run_evaluate(input(plan, "")).unwrap();
        let report = &output.report;

        assert!(report.approval_required);
        assert_eq!(report.outcome, Outcome::Error);
        assert_eq!(report.decisions.len(), 1);
        let err = report.error.as_ref().unwrap();
        assert_eq!(err.code, ids::CODE_MALFORMED_LINE);
        assert_eq!(err.line, Some(2));
        assert_eq!(report_exit_code(report), 1);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = run_evaluate(input(PLAN, "profile = \"nope\"")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown profile"));

        let err = run_evaluate(input(PLAN, "[policy\n")).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }
}
