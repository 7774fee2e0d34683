//! Plan text intake: ANSI stripping, summary detection, and change-line filtering.

use crate::model::{ChangeLine, PlanText, SummaryLine};
use planguard_types::PlanSummary;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Markers that identify a change line.
const CHANGE_MARKERS: [&str; 2] = ["will be", "must be"];

const NO_CHANGES_MARKER: &str = "No changes.";

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

const PLAN_PREFIX: &str = "Plan:";

/// Counts at the start of the text after an optional `Plan:` prefix.
static SUMMARY_COUNTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+) to import, )?(\d+) to add, (\d+) to change, (\d+) to destroy(.*)$")
        .expect("summary pattern is valid")
});

/// Remove terminal color sequences.
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(line, "")
}

/// True if the line announces a planned change.
pub fn is_change_line(line: &str) -> bool {
    CHANGE_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Recognise a summary line (`Plan: 1 to add, 0 to change, 2 to destroy.` or `No changes.`).
///
/// Only whole lines count. A bare count line without the `Plan:` prefix must end after the
/// destroy count, so resource attributes quoting a summary are never taken for one.
pub fn parse_summary(line: &str) -> Option<SummaryLine> {
    if line.starts_with(NO_CHANGES_MARKER) {
        return Some(SummaryLine::NoChanges);
    }

    let (counts, prefixed) = match line.strip_prefix(PLAN_PREFIX) {
        Some(rest) => (rest.trim_start(), true),
        None => (line, false),
    };
    let caps = SUMMARY_COUNTS.captures(counts)?;
    let tail = caps.get(5).map_or("", |m| m.as_str());
    if !prefixed && !tail.is_empty() && tail != "." {
        return None;
    }

    let count = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    Some(SummaryLine::Counts(PlanSummary {
        import: count(1),
        add: count(2),
        change: count(3),
        destroy: count(4),
    }))
}

/// Split rendered plan text into its summary and change lines.
///
/// The last summary line found wins, since the real summary closes the plan. Change lines keep
/// their 1-based position in `text`.
pub fn parse_plan_text(text: &str) -> PlanText {
    let mut plan = PlanText::default();

    for (line, line_no) in text.lines().zip(1u32..) {
        let clean = strip_ansi(line);
        let clean = clean.trim();

        if is_change_line(clean) {
            plan.change_lines.push(ChangeLine::new(line_no, clean));
        } else if let Some(summary) = parse_summary(clean) {
            plan.summary = Some(summary);
        }
    }

    plan
}
