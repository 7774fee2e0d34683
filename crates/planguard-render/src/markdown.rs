use crate::{RenderableOutcome, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Planguard report\n\n");
    let verdict = if report.approval_required {
        "APPROVAL REQUIRED"
    } else {
        "NO APPROVAL REQUIRED"
    };
    let outcome = match report.outcome {
        RenderableOutcome::NoChanges => "no changes",
        RenderableOutcome::Evaluated => "evaluated",
        RenderableOutcome::Error => "error",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Outcome: {}\n- Profile: `{}`\n- Lines: {} (evaluated) / {} (total)\n\n",
        verdict, outcome, report.data.profile, report.data.lines_evaluated, report.data.lines_total
    ));

    if report.data.short_circuited {
        out.push_str("> Note: evaluation stopped at the first change requiring approval.\n\n");
    }

    if let Some(err) = &report.error {
        out.push_str("## Error\n\n");
        match err.line {
            Some(line) => out.push_str(&format!("- `{}` at line {}: {}\n\n", err.code, line, err.message)),
            None => out.push_str(&format!("- `{}`: {}\n\n", err.code, err.message)),
        }
    }

    if report.decisions.is_empty() {
        out.push_str("No decisions.\n");
        return out;
    }

    out.push_str("## Decisions\n\n");
    out.push_str("| Line | Resource | Action | Policy | Approval |\n");
    out.push_str("|---:|---|---|---|---|\n");
    for d in &report.decisions {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} |\n",
            d.line,
            d.resource_path.replace('|', "\\|"),
            d.action,
            d.matched,
            if d.requires_approval { "**required**" } else { "no" }
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableDecision, RenderableError};

    fn data(lines_total: u32, lines_evaluated: u32, short_circuited: bool) -> RenderableData {
        RenderableData {
            profile: "aws".to_string(),
            lines_total,
            lines_evaluated,
            short_circuited,
        }
    }

    #[test]
    fn renders_no_changes_report() {
        let report = RenderableReport {
            approval_required: false,
            outcome: RenderableOutcome::NoChanges,
            decisions: Vec::new(),
            error: None,
            data: data(0, 0, false),
        };
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **NO APPROVAL REQUIRED**"));
        assert!(md.contains("Outcome: no changes"));
        assert!(md.contains("No decisions."));
    }

    #[test]
    fn renders_decision_table_and_short_circuit_note() {
        let report = RenderableReport {
            approval_required: true,
            outcome: RenderableOutcome::Evaluated,
            decisions: vec![
                RenderableDecision {
                    line: 2,
                    resource_path: "aws_instance.a".to_string(),
                    resource_type: "aws_instance".to_string(),
                    action: "created".to_string(),
                    requires_approval: false,
                    matched: "created".to_string(),
                    code: None,
                    message: String::new(),
                },
                RenderableDecision {
                    line: 5,
                    resource_path: "aws_db_instance.main".to_string(),
                    resource_type: "aws_db_instance".to_string(),
                    action: "destroyed".to_string(),
                    requires_approval: true,
                    matched: "always_unsafe".to_string(),
                    code: Some("unsafe_resource_change".to_string()),
                    message: String::new(),
                },
            ],
            error: None,
            data: data(3, 2, true),
        };

        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **APPROVAL REQUIRED**"));
        assert!(md.contains("Lines: 2 (evaluated) / 3 (total)"));
        assert!(md.contains("> Note: evaluation stopped"));
        assert!(md.contains("| 2 | `aws_instance.a` | created | created | no |"));
        assert!(md.contains("| 5 | `aws_db_instance.main` | destroyed | always_unsafe | **required** |"));
    }

    #[test]
    fn renders_error_block() {
        let report = RenderableReport {
            approval_required: true,
            outcome: RenderableOutcome::Error,
            decisions: Vec::new(),
            error: Some(RenderableError {
                code: "malformed_line".to_string(),
                message: "malformed change line 3".to_string(),
                line: Some(3),
            }),
            data: data(1, 0, false),
        };
        let md = render_markdown(&report);
        assert!(md.contains("Outcome: error"));
        assert!(md.contains("## Error"));
        assert!(md.contains("- `malformed_line` at line 3: malformed change line 3"));
    }
}
