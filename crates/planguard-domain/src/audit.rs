use planguard_types::{Action, Decision, PolicyMatch, Verdict};

/// Human-readable audit line for a decision.
pub fn audit_message(
    resource_path: &str,
    resource_type: &str,
    action: Action,
    verdict: Verdict,
    matched: PolicyMatch,
) -> String {
    let outcome = match verdict {
        Verdict::RequireApproval => "approval required",
        Verdict::NoApproval => "no approval required",
    };
    let reason = match matched {
        PolicyMatch::Created => "creations are always allowed".to_string(),
        PolicyMatch::AlwaysUnsafe => format!("{resource_type} is always unsafe"),
        PolicyMatch::AlwaysSafe => format!("{resource_type} is always safe"),
        PolicyMatch::Unhandled if action.is_destructive() => {
            format!("{resource_type} is unhandled; destructive changes default to approval")
        }
        PolicyMatch::Unhandled => {
            format!("{resource_type} is unhandled; updates default to no approval")
        }
    };
    format!(
        "{resource_path} will be {}: {outcome} ({reason})",
        action.as_str()
    )
}

/// Emit the audit event for a decision.
pub fn record(decision: &Decision) {
    match decision.verdict {
        Verdict::RequireApproval => tracing::warn!(
            target: "planguard::audit",
            line = decision.line,
            resource_path = %decision.resource_path,
            resource_type = %decision.resource_type,
            action = decision.action.as_str(),
            matched = decision.matched.as_str(),
            approval_required = true,
            "{}",
            decision.message
        ),
        Verdict::NoApproval => tracing::info!(
            target: "planguard::audit",
            line = decision.line,
            resource_path = %decision.resource_path,
            resource_type = %decision.resource_type,
            action = decision.action.as_str(),
            matched = decision.matched.as_str(),
            approval_required = false,
            "{}",
            decision.message
        ),
    }
}
