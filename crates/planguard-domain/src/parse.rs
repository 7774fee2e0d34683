//! Change-line parser.
//!
//! A change line has the shape `<marker> <resource path> <verb phrase>`, for example
//! `# module.net.aws_security_group_rule.x will be destroyed`.

use crate::error::EvaluateError;
use crate::model::{ChangeLine, ResourceChangeLine};
use planguard_types::Action;

/// Action keywords in priority order. The first keyword found wins.
const ACTION_KEYWORDS: [(&str, Action); 4] = [
    ("destroyed", Action::Destroyed),
    ("replaced", Action::Replaced),
    ("updated", Action::Updated),
    ("created", Action::Created),
];

/// Parse one change line into a structured record.
///
/// Token and segment structure is checked before the action, so a line that is both malformed
/// and keyword-free reports [`EvaluateError::MalformedLine`].
pub fn parse_change_line(line: &ChangeLine) -> Result<ResourceChangeLine, EvaluateError> {
    let malformed = |reason: &'static str| EvaluateError::MalformedLine {
        line: line.line_no,
        text: line.text.clone(),
        reason,
    };

    let mut tokens = line.text.split_whitespace();
    let _marker = tokens.next().ok_or_else(|| malformed("empty line"))?;
    let resource_path = tokens
        .next()
        .ok_or_else(|| malformed("missing resource path"))?;

    let resource_type = resource_type_of(resource_path)
        .ok_or_else(|| malformed("resource path has fewer than two segments"))?;

    Ok(ResourceChangeLine {
        line_no: line.line_no,
        resource_path: resource_path.to_string(),
        resource_type: resource_type.to_string(),
        action: classify_action(&line.text),
    })
}

/// Classify the action named anywhere in a change line.
///
/// The whole line is searched, resource path included, so a keyword in a module or resource
/// name takes part in the priority order.
pub fn classify_action(text: &str) -> Action {
    ACTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, action)| *action)
        .unwrap_or(Action::Unknown)
}

/// The second-to-last dot-delimited segment of a resource path.
///
/// Instance keys (`[0]`, `["a.b"]`) are removed first so dots inside keys do not count as
/// separators.
pub fn resource_type_of(resource_path: &str) -> Option<&str> {
    let segments = segment_spans(resource_path);
    if segments.len() < 2 {
        return None;
    }
    let (start, end) = segments[segments.len() - 2];
    let resource_type = &resource_path[start..end];
    if resource_type.is_empty() {
        return None;
    }
    Some(resource_type)
}

/// Byte spans of the dot-delimited segments, each with its instance key removed.
fn segment_spans(path: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    // End of the segment name, i.e. where its first `[` begins.
    let mut name_end: Option<usize> = None;
    let mut depth = 0u32;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in path.char_indices() {
        if in_quotes {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' if depth > 0 => in_quotes = true,
            '[' => {
                if depth == 0 && name_end.is_none() {
                    name_end = Some(idx);
                }
                depth += 1;
            }
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                spans.push((start, name_end.unwrap_or(idx)));
                start = idx + 1;
                name_end = None;
            }
            _ => {}
        }
    }
    spans.push((start, name_end.unwrap_or(path.len())));
    spans
}
