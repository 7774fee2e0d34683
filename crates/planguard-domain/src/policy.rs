use std::collections::BTreeSet;

/// How a resource type is listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeClass {
    AlwaysUnsafe,
    AlwaysSafe,
    Unhandled,
}

/// The two policy lists. Fixed for the duration of a run.
///
/// The lists are expected to be disjoint (settings resolution guarantees it); if a type does
/// end up in both, `always_unsafe` wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicySet {
    pub always_unsafe: BTreeSet<String>,
    pub always_safe: BTreeSet<String>,
}

impl PolicySet {
    pub fn new<U, S>(always_unsafe: U, always_safe: S) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            always_unsafe: always_unsafe.into_iter().map(Into::into).collect(),
            always_safe: always_safe.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, resource_type: &str) -> TypeClass {
        if self.always_unsafe.contains(resource_type) {
            TypeClass::AlwaysUnsafe
        } else if self.always_safe.contains(resource_type) {
            TypeClass::AlwaysSafe
        } else {
            TypeClass::Unhandled
        }
    }

    pub fn is_disjoint(&self) -> bool {
        self.always_unsafe.is_disjoint(&self.always_safe)
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub policy: PolicySet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_lists() {
        let policy = PolicySet::new(["aws_instance"], ["aws_security_group_rule"]);
        assert_eq!(policy.classify("aws_instance"), TypeClass::AlwaysUnsafe);
        assert_eq!(
            policy.classify("aws_security_group_rule"),
            TypeClass::AlwaysSafe
        );
        assert_eq!(policy.classify("aws_s3_bucket"), TypeClass::Unhandled);
        assert!(policy.is_disjoint());
    }

    #[test]
    fn unsafe_wins_on_overlap() {
        let policy = PolicySet::new(["aws_instance"], ["aws_instance"]);
        assert!(!policy.is_disjoint());
        assert_eq!(policy.classify("aws_instance"), TypeClass::AlwaysUnsafe);
    }
}
