//! Fuzz target for config parsing and layering.
//!
//! Goal: config parsing and resolution should **never panic**.
//! A resolved policy never lists a type as both safe and unsafe.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_toml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use planguard_settings::Overrides;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = planguard_settings::parse_config_toml(text) else {
        return;
    };
    if let Ok(resolved) = planguard_settings::resolve_config(cfg, Overrides::default()) {
        assert!(resolved.effective.policy.is_disjoint());
    }
});
