//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to resolve the situation.
    pub remediation: &'static str,
    /// Plan excerpt and matching configuration.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Plan text that triggers the code.
    pub before: &'static str,
    /// `planguard.toml` (or plan text) that no longer triggers it.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_PLAN_APPROVAL_GATE => Some(explain_approval_gate()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_UNSAFE_RESOURCE_CHANGE => Some(explain_unsafe_resource_change()),
        ids::CODE_UNHANDLED_DESTRUCTIVE_CHANGE => Some(explain_unhandled_destructive_change()),
        ids::CODE_MALFORMED_LINE => Some(explain_malformed_line()),
        ids::CODE_UNCLASSIFIABLE_LINE => Some(explain_unclassifiable_line()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_PLAN_APPROVAL_GATE, ids::CHECK_TOOL_RUNTIME]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_UNSAFE_RESOURCE_CHANGE,
        ids::CODE_UNHANDLED_DESTRUCTIVE_CHANGE,
        ids::CODE_MALFORMED_LINE,
        ids::CODE_UNCLASSIFIABLE_LINE,
        ids::CODE_RUNTIME_ERROR,
    ]
}

// --- Check-level explanations ---

fn explain_approval_gate() -> Explanation {
    Explanation {
        title: "Plan Approval Gate",
        description: "\
Decides whether a rendered infrastructure plan needs a human review before apply.

Every line announcing a planned change (`will be ...` / `must be ...`) is classified:
- created resources never require approval
- resource types in `always_unsafe` require approval for update, destroy and replace
- resource types in `always_safe` never require approval
- unhandled types require approval when destroyed or replaced, but not when updated

Evaluation stops at the first line that requires approval. A plan reporting
`0 to add, 0 to change, 0 to destroy` is approved without looking at any line.",
        remediation: "\
Review the plan when `approvalRequired` is true. To change the outcome for a
resource type, list it in `planguard.toml`:

    [policy]
    always_unsafe = [\"aws_db_instance\"]
    always_safe = [\"aws_security_group_rule\"]",
        examples: ExamplePair {
            before: r#"  # aws_db_instance.main will be destroyed
Plan: 0 to add, 0 to change, 1 to destroy."#,
            after: r#"[policy]
always_unsafe = ["aws_db_instance"]"#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    let mut exp = explain_runtime_error();
    exp.title = "Tool Runtime";
    exp
}

// --- Code-level explanations ---

fn explain_unsafe_resource_change() -> Explanation {
    Explanation {
        title: "Unsafe Resource Change",
        description: "\
A resource whose type is listed in `always_unsafe` will be updated, destroyed or
replaced. Types land in this list because changing them risks data loss or
outages (databases, storage buckets, encryption keys).",
        remediation: "\
Have a reviewer approve the plan. If the type is routinely safe to change in this
repository, move it to `always_safe`.",
        examples: ExamplePair {
            before: r#"  # module.data.aws_s3_bucket.logs must be replaced"#,
            after: r#"[policy]
always_safe = ["aws_s3_bucket"]"#,
        },
    }
}

fn explain_unhandled_destructive_change() -> Explanation {
    Explanation {
        title: "Unhandled Destructive Change",
        description: "\
A resource whose type is in neither policy list will be destroyed or replaced.
Unknown types are treated conservatively: destruction needs approval, while an
in-place update of an unknown type does not.",
        remediation: "\
Have a reviewer approve the plan, then classify the type so the next plan gets a
deliberate decision: add it to `always_safe` or `always_unsafe`.",
        examples: ExamplePair {
            before: r#"  # aws_cloudwatch_log_group.app will be destroyed"#,
            after: r#"[policy]
always_safe = ["aws_cloudwatch_log_group"]"#,
        },
    }
}

fn explain_malformed_line() -> Explanation {
    Explanation {
        title: "Malformed Change Line",
        description: "\
A change line does not have the shape `<marker> <resource path> <verb phrase>`,
or its resource path has fewer than two dot-separated segments, so no resource
type can be extracted. The run fails and approval is required by default.",
        remediation: "\
Render the plan with the provisioning tool's plain text output (for example
`terraform show -no-color plan.tfplan`) and pass that text unmodified.",
        examples: ExamplePair {
            before: r#"  # will be destroyed"#,
            after: r#"  # aws_instance.web will be destroyed"#,
        },
    }
}

fn explain_unclassifiable_line() -> Explanation {
    Explanation {
        title: "Unclassifiable Change Line",
        description: "\
A change line mentions none of the action keywords `destroyed`, `replaced`,
`updated` or `created`. Its verdict cannot be determined, so the run fails and
approval is required by default.",
        remediation: "\
Check whether the plan contains an action planguard does not understand (for
example data source reads or imports) and review the plan manually.",
        examples: ExamplePair {
            before: r#"  # data.aws_ami.ubuntu will be read during apply"#,
            after: r#"  # aws_instance.web will be updated in-place"#,
        },
    }
}

fn explain_runtime_error() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "\
planguard could not complete: the plan text or configuration could not be read,
or the configuration is invalid. Approval is required by default.",
        remediation: "\
Fix the reported error (paths, permissions, `planguard.toml` syntax) and re-run.",
        examples: ExamplePair {
            before: r#"[policy]
always_unsafe = ["aws_instance"]
always_safe = ["aws_instance"]"#,
            after: r#"[policy]
always_unsafe = ["aws_instance"]"#,
        },
    }
}
