use crate::RenderableReport;

const CHECK_ID: &str = "plan.approval_gate";

/// Render a report as GitHub Actions workflow command annotations.
///
/// Decisions that require approval become `::warning`, an evaluation error becomes `::error`.
/// Format: `::{level} title={title}::[{id}:{code}] {message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(err) = &report.error {
        let title = match err.line {
            Some(line) => format!("planguard error at plan line {line}"),
            None => "planguard error".to_string(),
        };
        out.push(annotation(
            "error",
            &title,
            &format!("[{CHECK_ID}:{}] {}", err.code, err.message),
        ));
    }

    for d in report.decisions.iter().filter(|d| d.requires_approval) {
        let code = d.code.as_deref().unwrap_or("approval_required");
        out.push(annotation(
            "warning",
            &format!("Approval required at plan line {}", d.line),
            &format!("[{CHECK_ID}:{code}] {}", d.message),
        ));
    }

    out
}

fn annotation(level: &str, title: &str, message: &str) -> String {
    format!(
        "::{level} title={}::{}",
        escape_property(title),
        escape_data(message)
    )
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
