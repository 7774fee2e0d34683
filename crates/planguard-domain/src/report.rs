use planguard_types::{Decision, Outcome, PlanSummary};

/// Terminal result of one evaluation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationResult {
    pub approval_required: bool,
    pub outcome: Outcome,
    /// One entry per evaluated line, in plan order.
    pub decisions: Vec<Decision>,
    /// Change lines found in the plan text.
    pub lines_total: u32,
    pub short_circuited: bool,
    pub summary: Option<PlanSummary>,
}

impl EvaluationResult {
    pub fn no_changes(lines_total: u32, summary: Option<PlanSummary>) -> Self {
        Self {
            approval_required: false,
            outcome: Outcome::NoChanges,
            decisions: Vec::new(),
            lines_total,
            short_circuited: false,
            summary,
        }
    }

    pub fn lines_evaluated(&self) -> u32 {
        self.decisions.len() as u32
    }

    /// The decision that triggered approval, if any.
    pub fn approving_decision(&self) -> Option<&Decision> {
        self.decisions
            .iter()
            .find(|d| d.verdict.requires_approval())
    }
}
