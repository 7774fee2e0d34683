use crate::{
    model::PlanguardConfigV1,
    presets::{self, DEFAULT_PROFILE, PROFILES},
};
use anyhow::Context;
use planguard_domain::policy::{EffectiveConfig, PolicySet};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    /// `--unsafe TYPE` entries.
    pub always_unsafe: Vec<String>,
    /// `--safe TYPE` entries.
    pub always_safe: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PlanguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected one of: {})",
            PROFILES.join(", ")
        )
    })?;

    apply_layer(
        &mut effective.policy,
        "config",
        &cfg.policy.always_unsafe,
        &cfg.policy.always_safe,
    )?;
    apply_layer(
        &mut effective.policy,
        "command line",
        &overrides.always_unsafe,
        &overrides.always_safe,
    )?;

    debug_assert!(effective.policy.is_disjoint());
    Ok(ResolvedConfig { effective })
}

/// Merge one layer into the policy. A type listed by this layer leaves the opposite set.
fn apply_layer(
    policy: &mut PolicySet,
    layer: &str,
    always_unsafe: &[String],
    always_safe: &[String],
) -> anyhow::Result<()> {
    let unsafe_types = parse_types(always_unsafe)
        .with_context(|| format!("invalid always_unsafe entry in {layer}"))?;
    let safe_types = parse_types(always_safe)
        .with_context(|| format!("invalid always_safe entry in {layer}"))?;

    if let Some(both) = unsafe_types.intersection(&safe_types).next() {
        anyhow::bail!("{both} is listed as both always_unsafe and always_safe in {layer}");
    }

    for ty in unsafe_types {
        policy.always_safe.remove(&ty);
        policy.always_unsafe.insert(ty);
    }
    for ty in safe_types {
        policy.always_unsafe.remove(&ty);
        policy.always_safe.insert(ty);
    }
    Ok(())
}

fn parse_types(entries: &[String]) -> anyhow::Result<BTreeSet<String>> {
    entries.iter().map(|entry| parse_type(entry)).collect()
}

fn parse_type(entry: &str) -> anyhow::Result<String> {
    let ty = entry.trim();
    if ty.is_empty() {
        anyhow::bail!("resource type must not be empty");
    }
    if ty.contains(char::is_whitespace) || ty.contains('.') {
        anyhow::bail!("{ty:?} is not a single resource type segment");
    }
    Ok(ty.to_string())
}
