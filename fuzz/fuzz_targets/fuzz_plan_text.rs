//! Fuzz target for plan text intake and change line parsing.
//!
//! Goal: intake and evaluation should **never panic** on any input.
//! Malformed lines must surface as errors, not crashes.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_plan_text
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use planguard_domain::policy::{EffectiveConfig, PolicySet};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let plan = planguard_domain::plan::parse_plan_text(&text);
    for line in &plan.change_lines {
        let _ = planguard_domain::parse::parse_change_line(line);
    }

    let cfg = EffectiveConfig {
        profile: "fuzz".to_string(),
        policy: PolicySet::new(["aws_db_instance"], ["aws_security_group_rule"]),
    };
    if let Err(failure) = planguard_domain::evaluate(&plan, &cfg) {
        // An aborted evaluation always reports a line inside the plan.
        assert!(failure.error.line() >= 1);
    }
});
