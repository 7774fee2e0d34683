use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `planguard.toml` schema v1.
///
/// Unknown keys are rejected: a misspelled list name would otherwise drop the policy silently.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PlanguardConfigV1 {
    /// Optional schema string for tooling (`planguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset policy lists to start from: `empty` (default) or `aws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Resource types whose update, destroy or replace always requires approval.
    #[serde(default)]
    pub always_unsafe: Vec<String>,

    /// Resource types whose update, destroy or replace never requires approval.
    #[serde(default)]
    pub always_safe: Vec<String>,
}
