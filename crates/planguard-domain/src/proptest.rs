//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Verdict resolution per action and policy membership
//! - Short-circuit behaviour over line sequences
//! - Parser robustness on arbitrary input

use crate::engine::{evaluate_lines, resolve_verdict};
use crate::model::ChangeLine;
use crate::parse::parse_change_line;
use crate::plan::parse_plan_text;
use crate::policy::PolicySet;
use planguard_types::{Action, PolicyMatch, Verdict};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Pool of resource types so generated policies and lines overlap often.
const TYPE_POOL: [&str; 8] = [
    "aws_instance",
    "aws_db_instance",
    "aws_s3_bucket",
    "aws_security_group_rule",
    "aws_iam_role",
    "aws_lambda_function",
    "google_compute_instance",
    "azurerm_resource_group",
];

/// Action keywords appear anywhere in a line, so generated identifiers must avoid them.
fn without_keywords(ident: &String) -> bool {
    !["destroyed", "replaced", "updated", "created"]
        .iter()
        .any(|keyword| ident.contains(keyword))
}

fn arb_type() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(TYPE_POOL.to_vec()).prop_map(str::to_string),
        prop::string::string_regex("[a-z][a-z0-9_]{0,20}")
            .unwrap()
            .prop_filter("identifier names an action", without_keywords),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}")
        .unwrap()
        .prop_filter("identifier names an action", without_keywords)
}

/// Resource path with an optional module prefix and optional instance key.
fn arb_path(resource_type: String) -> impl Strategy<Value = String> {
    (
        prop::option::of(arb_name()),
        arb_name(),
        prop::option::of(0u32..10),
    )
        .prop_map(move |(module, name, index)| {
            let mut path = String::new();
            if let Some(module) = module {
                path.push_str(&format!("module.{module}."));
            }
            path.push_str(&format!("{resource_type}.{name}"));
            if let Some(index) = index {
                path.push_str(&format!("[{index}]"));
            }
            path
        })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Created),
        Just(Action::Updated),
        Just(Action::Destroyed),
        Just(Action::Replaced),
    ]
}

fn phrase(action: Action) -> &'static str {
    match action {
        Action::Created => "will be created",
        Action::Updated => "will be updated in-place",
        Action::Destroyed => "will be destroyed",
        Action::Replaced => "must be replaced",
        Action::Unknown => "will be read during apply",
    }
}

/// A disjoint policy drawn from the type pool.
fn arb_policy() -> impl Strategy<Value = PolicySet> {
    (
        prop::collection::btree_set(prop::sample::select(TYPE_POOL.to_vec()), 0..5),
        prop::collection::btree_set(prop::sample::select(TYPE_POOL.to_vec()), 0..5),
    )
        .prop_map(|(unsafe_types, safe_types)| {
            let safe_types: BTreeSet<&str> =
                safe_types.difference(&unsafe_types).copied().collect();
            PolicySet::new(unsafe_types, safe_types)
        })
}

fn arb_line() -> impl Strategy<Value = (String, Action)> {
    (arb_type(), arb_action()).prop_flat_map(|(resource_type, action)| {
        arb_path(resource_type).prop_map(move |path| (format!("# {path} {}", phrase(action)), action))
    })
}

// ============================================================================
// Verdict properties
// ============================================================================

proptest! {
    #[test]
    fn created_never_requires_approval(resource_type in arb_type(), policy in arb_policy()) {
        let resolved = resolve_verdict(Action::Created, &resource_type, &policy);
        prop_assert_eq!(resolved, Some((Verdict::NoApproval, PolicyMatch::Created)));
    }

    #[test]
    fn unsafe_destructive_requires_approval(
        policy in arb_policy(),
        action in prop_oneof![Just(Action::Destroyed), Just(Action::Replaced)],
    ) {
        for resource_type in &policy.always_unsafe {
            let resolved = resolve_verdict(action, resource_type, &policy);
            prop_assert_eq!(resolved, Some((Verdict::RequireApproval, PolicyMatch::AlwaysUnsafe)));
        }
    }

    #[test]
    fn safe_types_never_require_approval(
        policy in arb_policy(),
        action in prop_oneof![Just(Action::Updated), Just(Action::Destroyed), Just(Action::Replaced)],
    ) {
        for resource_type in &policy.always_safe {
            let resolved = resolve_verdict(action, resource_type, &policy);
            prop_assert_eq!(resolved, Some((Verdict::NoApproval, PolicyMatch::AlwaysSafe)));
        }
    }

    #[test]
    fn unhandled_types_follow_the_asymmetry(resource_type in arb_type(), action in arb_action()) {
        let policy = PolicySet::default();
        let (verdict, matched) = resolve_verdict(action, &resource_type, &policy).unwrap();
        match action {
            Action::Created => prop_assert_eq!(verdict, Verdict::NoApproval),
            Action::Updated => {
                prop_assert_eq!(verdict, Verdict::NoApproval);
                prop_assert_eq!(matched, PolicyMatch::Unhandled);
            }
            Action::Destroyed | Action::Replaced => {
                prop_assert_eq!(verdict, Verdict::RequireApproval);
                prop_assert_eq!(matched, PolicyMatch::Unhandled);
            }
            Action::Unknown => unreachable!("not generated"),
        }
    }
}

// ============================================================================
// Sequence properties
// ============================================================================

proptest! {
    #[test]
    fn stops_exactly_at_first_required_approval(
        generated in prop::collection::vec(arb_line(), 0..20),
        policy in arb_policy(),
    ) {
        let lines = ChangeLine::numbered(generated.iter().map(|(text, _)| text.clone()));

        // Reference model: first index whose verdict requires approval.
        let verdicts: Vec<Verdict> = lines
            .iter()
            .map(|line| {
                let parsed = parse_change_line(line).unwrap();
                resolve_verdict(parsed.action, &parsed.resource_type, &policy).unwrap().0
            })
            .collect();
        let first_required = verdicts.iter().position(|v| v.requires_approval());

        let result = evaluate_lines(&lines, &policy).unwrap();

        prop_assert_eq!(result.approval_required, first_required.is_some());
        let expected_len = first_required.map(|idx| idx + 1).unwrap_or(lines.len());
        prop_assert_eq!(result.decisions.len(), expected_len);
        prop_assert!(result.decisions.iter().rev().skip(1).all(|d| !d.verdict.requires_approval()));
        for (decision, (_, action)) in result.decisions.iter().zip(&generated) {
            prop_assert_eq!(decision.action, *action);
        }
    }

    #[test]
    fn evaluation_is_deterministic(
        generated in prop::collection::vec(arb_line(), 0..10),
        policy in arb_policy(),
    ) {
        let lines = ChangeLine::numbered(generated.into_iter().map(|(text, _)| text));
        let first = evaluate_lines(&lines, &policy).unwrap();
        let second = evaluate_lines(&lines, &policy).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Robustness
// ============================================================================

proptest! {
    #[test]
    fn parser_never_panics(text in ".{0,200}") {
        let _ = parse_change_line(&ChangeLine::new(1, text.clone()));
        let _ = parse_plan_text(&text);
    }

    #[test]
    fn evaluating_arbitrary_lines_never_panics(
        texts in prop::collection::vec(".{0,80}", 0..10),
        policy in arb_policy(),
    ) {
        let lines = ChangeLine::numbered(texts);
        let _ = evaluate_lines(&lines, &policy);
    }
}
