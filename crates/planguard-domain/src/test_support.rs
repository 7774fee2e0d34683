use crate::model::ChangeLine;
use crate::policy::{EffectiveConfig, PolicySet};

pub fn policy(always_unsafe: &[&str], always_safe: &[&str]) -> PolicySet {
    PolicySet::new(
        always_unsafe.iter().copied(),
        always_safe.iter().copied(),
    )
}

pub fn config(always_unsafe: &[&str], always_safe: &[&str]) -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        policy: policy(always_unsafe, always_safe),
    }
}

pub fn lines(texts: &[&str]) -> Vec<ChangeLine> {
    ChangeLine::numbered(texts.iter().copied())
}
