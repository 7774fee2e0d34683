//! Rendering utilities for CI surfaces (Markdown, GitHub annotations, output variables).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod output;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableDecision, RenderableError, RenderableOutcome, RenderableReport,
};
pub use output::{OutputFormat, render_output_variable};
