//! Stable identifiers for checks and decision codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_PLAN_APPROVAL_GATE: &str = "plan.approval_gate";

// Codes: plan.approval_gate (decisions)
pub const CODE_UNSAFE_RESOURCE_CHANGE: &str = "unsafe_resource_change";
pub const CODE_UNHANDLED_DESTRUCTIVE_CHANGE: &str = "unhandled_destructive_change";

// Codes: plan.approval_gate (evaluation errors)
pub const CODE_MALFORMED_LINE: &str = "malformed_line";
pub const CODE_UNCLASSIFIABLE_LINE: &str = "unclassifiable_line";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// Name of the pipeline variable carrying the verdict.
pub const DEFAULT_OUTPUT_NAME: &str = "approvalRequired";
