use planguard_types::{Action, PlanSummary};

/// A raw change line as it appeared in the plan text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeLine {
    /// 1-based line number in the plan text.
    pub line_no: u32,
    pub text: String,
}

impl ChangeLine {
    pub fn new<S: Into<String>>(line_no: u32, text: S) -> Self {
        Self {
            line_no,
            text: text.into(),
        }
    }

    /// Number a pre-filtered sequence of lines from 1.
    pub fn numbered<I, S>(lines: I) -> Vec<ChangeLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .zip(1u32..)
            .map(|(text, line_no)| ChangeLine::new(line_no, text))
            .collect()
    }
}

/// One parsed change line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceChangeLine {
    pub line_no: u32,
    pub resource_path: String,
    pub resource_type: String,
    pub action: Action,
}

/// What the plan's summary section says about the size of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryLine {
    /// `Plan: N to add, N to change, N to destroy.`
    Counts(PlanSummary),
    /// `No changes.`
    NoChanges,
}

impl SummaryLine {
    pub fn counts(&self) -> PlanSummary {
        match self {
            SummaryLine::Counts(summary) => *summary,
            SummaryLine::NoChanges => PlanSummary::default(),
        }
    }
}

/// Plan text after intake: the summary (if any) and the filtered change lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanText {
    pub summary: Option<SummaryLine>,
    pub change_lines: Vec<ChangeLine>,
}

impl PlanText {
    /// Zero-change pre-check.
    ///
    /// True when the summary reports nothing to add, change or destroy, when the plan says
    /// `No changes.`, or when the text carries neither a summary nor a change line.
    pub fn is_zero_change(&self) -> bool {
        match &self.summary {
            Some(summary) => summary.counts().is_zero_change(),
            None => self.change_lines.is_empty(),
        }
    }
}
