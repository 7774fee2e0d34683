//! The `explain` use case: look up check/code documentation.

use planguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a check_id or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    for (label, body) in [("Triggered by:", exp.examples.before), ("Resolved with:", exp.examples.after)] {
        out.push_str(label);
        out.push_str("\n```\n");
        out.push_str(body);
        out.push_str("\n```\n");
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check_id or code: {identifier}\n\n"));
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_known_ids() {
        for id in ["plan.approval_gate", "unsafe_resource_change", "malformed_line"] {
            assert!(matches!(run_explain(id), ExplainOutput::Found(_)), "{id}");
        }
    }

    #[test]
    fn explain_unknown_lists_alternatives() {
        match run_explain("deps.no_wildcards") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
                available_codes,
            } => {
                assert_eq!(identifier, "deps.no_wildcards");
                assert!(available_check_ids.contains(&"plan.approval_gate"));
                assert!(available_codes.contains(&"unclassifiable_line"));
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let ExplainOutput::Found(exp) = run_explain("unhandled_destructive_change") else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with("Unhandled Destructive Change\n============================\n"));
        assert!(formatted.contains("Remediation"));
        assert!(formatted.contains("Triggered by:\n```\n  # aws_cloudwatch_log_group.app will be destroyed\n```"));
        assert!(formatted.contains("Resolved with:"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["check.one"], &["code.one", "code.two"]);
        assert!(formatted.contains("Unknown check_id or code: missing"));
        assert!(formatted.contains("  - check.one\n"));
        assert!(formatted.contains("Available codes:\n  - code.one\n  - code.two\n"));
    }
}
