use crate::audit;
use crate::error::{EvaluateError, EvaluationFailure};
use crate::model::{ChangeLine, PlanText};
use crate::parse::parse_change_line;
use crate::plan::parse_plan_text;
use crate::policy::{EffectiveConfig, PolicySet, TypeClass};
use crate::report::EvaluationResult;
use planguard_types::{Action, Decision, Outcome, PolicyMatch, Verdict, ids};

/// Evaluate rendered plan text.
pub fn evaluate_text(
    text: &str,
    cfg: &EffectiveConfig,
) -> Result<EvaluationResult, EvaluationFailure> {
    evaluate(&parse_plan_text(text), cfg)
}

/// Evaluate a plan after intake: zero-change pre-check, then the change lines.
pub fn evaluate(
    plan: &PlanText,
    cfg: &EffectiveConfig,
) -> Result<EvaluationResult, EvaluationFailure> {
    let summary = plan.summary.map(|s| s.counts());
    let lines_total = plan.change_lines.len() as u32;

    if plan.is_zero_change() {
        tracing::info!(
            profile = %cfg.profile,
            lines_total,
            "plan has no changes; no approval required"
        );
        return Ok(EvaluationResult::no_changes(lines_total, summary));
    }

    let mut result = evaluate_lines(&plan.change_lines, &cfg.policy)?;
    result.summary = summary;
    Ok(result)
}

/// Evaluate change lines in order, stopping at the first line that requires approval.
pub fn evaluate_lines(
    lines: &[ChangeLine],
    policy: &PolicySet,
) -> Result<EvaluationResult, EvaluationFailure> {
    let lines_total = lines.len() as u32;
    let mut decisions: Vec<Decision> = Vec::new();

    for line in lines {
        let decision = match decide(line, policy) {
            Ok(decision) => decision,
            Err(error) => {
                tracing::error!(line = error.line(), code = error.code(), "{error}");
                return Err(EvaluationFailure {
                    error,
                    decisions,
                    lines_total,
                });
            }
        };

        audit::record(&decision);
        let stop = decision.verdict.requires_approval();
        decisions.push(decision);

        if stop {
            return Ok(EvaluationResult {
                approval_required: true,
                outcome: Outcome::Evaluated,
                short_circuited: (decisions.len() as u32) < lines_total,
                decisions,
                lines_total,
                summary: None,
            });
        }
    }

    Ok(EvaluationResult {
        approval_required: false,
        outcome: Outcome::Evaluated,
        decisions,
        lines_total,
        short_circuited: false,
        summary: None,
    })
}

/// Verdict for one action on one resource type.
///
/// Returns `None` for [`Action::Unknown`]: the verdict is undetermined.
pub fn resolve_verdict(
    action: Action,
    resource_type: &str,
    policy: &PolicySet,
) -> Option<(Verdict, PolicyMatch)> {
    let resolved = match action {
        Action::Unknown => return None,
        Action::Created => (Verdict::NoApproval, PolicyMatch::Created),
        Action::Updated | Action::Destroyed | Action::Replaced => {
            match policy.classify(resource_type) {
                TypeClass::AlwaysUnsafe => (Verdict::RequireApproval, PolicyMatch::AlwaysUnsafe),
                TypeClass::AlwaysSafe => (Verdict::NoApproval, PolicyMatch::AlwaysSafe),
                TypeClass::Unhandled if action.is_destructive() => {
                    (Verdict::RequireApproval, PolicyMatch::Unhandled)
                }
                TypeClass::Unhandled => (Verdict::NoApproval, PolicyMatch::Unhandled),
            }
        }
    };
    Some(resolved)
}

fn decide(line: &ChangeLine, policy: &PolicySet) -> Result<Decision, EvaluateError> {
    let parsed = parse_change_line(line)?;

    let (verdict, matched) = resolve_verdict(parsed.action, &parsed.resource_type, policy)
        .ok_or_else(|| EvaluateError::UnclassifiableLine {
            line: line.line_no,
            text: line.text.clone(),
        })?;

    let code = match (verdict, matched) {
        (Verdict::RequireApproval, PolicyMatch::AlwaysUnsafe) => {
            Some(ids::CODE_UNSAFE_RESOURCE_CHANGE.to_string())
        }
        (Verdict::RequireApproval, _) => Some(ids::CODE_UNHANDLED_DESTRUCTIVE_CHANGE.to_string()),
        (Verdict::NoApproval, _) => None,
    };

    let message = audit::audit_message(
        &parsed.resource_path,
        &parsed.resource_type,
        parsed.action,
        verdict,
        matched,
    );

    Ok(Decision {
        line: parsed.line_no,
        resource_path: parsed.resource_path,
        resource_type: parsed.resource_type,
        action: parsed.action,
        verdict,
        matched,
        code,
        message,
    })
}
