//! Use case orchestration for planguard.
//!
//! This crate is the application layer: use cases that coordinate the settings, domain, and
//! render layers. The CLI crate depends on this and only handles argument parsing and IO.

#![forbid(unsafe_code)]

mod evaluate;
mod explain;
mod render;
mod report;

pub use evaluate::{EvaluateInput, EvaluateOutput, report_exit_code, run_evaluate};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
