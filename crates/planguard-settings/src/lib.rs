//! Config parsing and preset/override resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{PlanguardConfigV1, PolicyConfig};
pub use presets::{DEFAULT_PROFILE, PROFILES};
pub use resolve::{Overrides, ResolvedConfig};

/// Schema id accepted in the optional `schema` key of `planguard.toml`.
pub const SCHEMA_CONFIG_V1: &str = "planguard.config.v1";

/// Parse `planguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PlanguardConfigV1> {
    let cfg: PlanguardConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }
    Ok(cfg)
}

/// Resolve the policy sets used by the engine (preset, then config lists, then overrides).
pub fn resolve_config(
    cfg: PlanguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = parse_config_toml(
            r#"
schema = "planguard.config.v1"
profile = "aws"

[policy]
always_unsafe = ["aws_db_instance"]
always_safe = ["aws_security_group_rule"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.profile.as_deref(), Some("aws"));
        assert_eq!(cfg.policy.always_unsafe, vec!["aws_db_instance"]);
        assert_eq!(cfg.policy.always_safe, vec!["aws_security_group_rule"]);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config_toml("").unwrap(), PlanguardConfigV1::default());
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_config_toml(r#"schema = "planguard.config.v2""#).unwrap_err();
        assert!(err.to_string().contains("unsupported config schema"));
    }

    #[test]
    fn rejects_misspelled_keys() {
        let err = parse_config_toml("[policy]\nalways_unsafe_types = [\"aws_vpc\"]").unwrap_err();
        assert!(err.to_string().contains("always_unsafe_types"));

        let err = parse_config_toml("[polcy]\nalways_unsafe = [\"aws_vpc\"]").unwrap_err();
        assert!(err.to_string().contains("polcy"));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(parse_config_toml("[policy]\nalways_unsafe = \"aws_instance\"").is_err());
    }
}
