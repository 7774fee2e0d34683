//! Pure policy evaluation (no IO).
//!
//! Input: rendered plan text and an effective policy, both constructed elsewhere.
//! Output: decisions + approval verdict + summary data.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod parse;
pub mod plan;
pub mod policy;
pub mod report;

mod audit;
mod engine;

pub use engine::{evaluate, evaluate_lines, evaluate_text, resolve_verdict};
pub use error::{EvaluateError, EvaluationFailure};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
