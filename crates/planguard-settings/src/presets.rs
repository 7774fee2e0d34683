use planguard_domain::policy::{EffectiveConfig, PolicySet};

pub const DEFAULT_PROFILE: &str = "empty";

/// Known preset names.
pub const PROFILES: [&str; 2] = ["empty", "aws"];

/// Preset policy lists for a profile, or `None` for an unknown name.
///
/// Keep these short. Anything repo-specific belongs in `planguard.toml`.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    let policy = match profile {
        "empty" => PolicySet::default(),
        "aws" => aws_policy(),
        _ => return None,
    };
    Some(EffectiveConfig {
        profile: profile.to_string(),
        policy,
    })
}

fn aws_policy() -> PolicySet {
    // Stateful or widely depended-on resources.
    let always_unsafe = [
        "aws_db_instance",
        "aws_rds_cluster",
        "aws_rds_cluster_instance",
        "aws_dynamodb_table",
        "aws_s3_bucket",
        "aws_efs_file_system",
        "aws_elasticache_replication_group",
        "aws_kms_key",
        "aws_route53_zone",
        "aws_vpc",
        "aws_subnet",
        "aws_eks_cluster",
        "aws_instance",
        "aws_iam_role",
        "aws_lb",
    ];
    // Attachments and rules that are cheap to recreate.
    let always_safe = [
        "aws_security_group_rule",
        "aws_vpc_security_group_ingress_rule",
        "aws_vpc_security_group_egress_rule",
        "aws_iam_role_policy_attachment",
        "aws_iam_role_policy",
        "aws_cloudwatch_metric_alarm",
        "aws_cloudwatch_event_target",
        "aws_lambda_permission",
        "aws_autoscaling_policy",
    ];
    PolicySet::new(always_unsafe, always_safe)
}
