use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for planguard reports.
pub const SCHEMA_REPORT_V1: &str = "planguard.report.v1";

/// Planned action for one resource, as announced by the plan text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Updated,
    Destroyed,
    Replaced,
    Unknown,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Destroyed => "destroyed",
            Action::Replaced => "replaced",
            Action::Unknown => "unknown",
        }
    }

    /// Destroy and replace both remove the existing object.
    pub fn is_destructive(self) -> bool {
        matches!(self, Action::Destroyed | Action::Replaced)
    }
}

/// Per-line verdict.
///
/// There is deliberately no "undetermined" value: a line that cannot be classified aborts
/// evaluation with an error instead of producing a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    RequireApproval,
    NoApproval,
}

impl Verdict {
    pub fn requires_approval(self) -> bool {
        self == Verdict::RequireApproval
    }
}

/// Which rule produced a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMatch {
    /// Creations never require approval.
    Created,
    AlwaysUnsafe,
    AlwaysSafe,
    /// The resource type is in neither list.
    Unhandled,
}

impl PolicyMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyMatch::Created => "created",
            PolicyMatch::AlwaysUnsafe => "always_unsafe",
            PolicyMatch::AlwaysSafe => "always_safe",
            PolicyMatch::Unhandled => "unhandled",
        }
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The zero-change pre-check matched; no line was evaluated.
    NoChanges,
    Evaluated,
    /// Evaluation or the tool itself failed; approval is required by default.
    Error,
}

/// Audit record for one evaluated change line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    /// 1-based line number in the plan text.
    pub line: u32,
    pub resource_path: String,
    pub resource_type: String,
    pub action: Action,
    pub verdict: Verdict,
    pub matched: PolicyMatch,

    /// Stable code for decisions that require approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub message: String,
}

/// Counts from the plan's `Plan: ...` summary line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanSummary {
    #[serde(default)]
    pub import: u32,
    pub add: u32,
    pub change: u32,
    pub destroy: u32,
}

impl PlanSummary {
    /// True when nothing is added, changed, or destroyed. Imports alone do not count.
    pub fn is_zero_change(&self) -> bool {
        self.add == 0 && self.change == 0 && self.destroy == 0
    }
}

/// Failure carried by an `error` outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Planguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PlanguardData {
    pub profile: String,

    /// Change lines found in the plan text.
    pub lines_total: u32,
    /// Change lines that received a decision.
    pub lines_evaluated: u32,
    /// Evaluation stopped at the first line requiring approval.
    pub short_circuited: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlanSummary>,

    pub unsafe_types: u32,
    pub safe_types: u32,
}

/// A generic report envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = PlanguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,

    /// The gate value published to the pipeline.
    pub approval_required: bool,
    pub outcome: Outcome,
    pub decisions: Vec<Decision>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,

    pub data: TData,
}

pub type PlanguardReport = ReportEnvelope<PlanguardData>;
