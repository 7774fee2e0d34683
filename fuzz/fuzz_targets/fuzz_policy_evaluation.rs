//! Fuzz target for policy classification over structured change lines.
//!
//! Goal: a created resource never requires approval, and evaluation stops
//! at the first decision that does.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_evaluation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use planguard_domain::policy::PolicySet;

const VERBS: [&str; 5] = [
    "will be created",
    "will be updated in-place",
    "will be destroyed",
    "must be replaced",
    "will be read during apply",
];

#[derive(Arbitrary, Debug)]
struct PolicyInput {
    always_unsafe: Vec<String>,
    always_safe: Vec<String>,
    /// (resource type, resource name, verb index)
    lines: Vec<(String, String, u8)>,
}

fuzz_target!(|input: PolicyInput| {
    if input.lines.len() > 64 || input.always_unsafe.len() + input.always_safe.len() > 64 {
        return;
    }

    let policy = PolicySet::new(input.always_unsafe, input.always_safe);
    let text: String = input
        .lines
        .iter()
        .map(|(ty, name, verb)| {
            let verb = VERBS[usize::from(*verb) % VERBS.len()];
            format!("  # {ty}.{name} {verb}\n")
        })
        .collect();

    let plan = planguard_domain::plan::parse_plan_text(&text);
    let Ok(result) = planguard_domain::evaluate_lines(&plan.change_lines, &policy) else {
        return;
    };

    let required = result
        .decisions
        .iter()
        .position(|d| d.verdict.requires_approval());
    if let Some(idx) = required {
        assert_eq!(idx + 1, result.decisions.len());
    }
    assert_eq!(required.is_some(), result.approval_required);
    for decision in &result.decisions {
        if decision.action.as_str() == "created" {
            assert!(!decision.verdict.requires_approval());
        }
    }
});
