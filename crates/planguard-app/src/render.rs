//! Render use cases: markdown and GitHub annotations from in-memory reports.

use planguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    planguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    planguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{runtime_error_report, to_renderable};
    use planguard_render::RenderableDecision;

    #[test]
    fn render_annotations_respects_max() {
        let mut report = to_renderable(&runtime_error_report("boom"));
        report.decisions.push(RenderableDecision {
            line: 1,
            resource_path: "aws_vpc.main".to_string(),
            resource_type: "aws_vpc".to_string(),
            action: "replaced".to_string(),
            requires_approval: true,
            matched: "always_unsafe".to_string(),
            code: Some("unsafe_resource_change".to_string()),
            message: "aws_vpc.main will be replaced".to_string(),
        });

        assert_eq!(render_annotations(&report, 10).len(), 2);
        let limited = render_annotations(&report, 1);
        assert_eq!(limited.len(), 1);
        assert!(limited[0].starts_with("::error"));
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&to_renderable(&runtime_error_report("boom")));
        assert!(markdown.contains("APPROVAL REQUIRED"));
        assert!(markdown.contains("`runtime_error`: boom"));
    }
}
