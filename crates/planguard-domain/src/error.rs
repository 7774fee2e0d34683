use planguard_types::{Decision, ids};
use thiserror::Error;

/// Input errors that abort evaluation. Both are fail-safe: the run requires approval.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluateError {
    /// The line lacks the token or segment structure needed to find a resource type.
    #[error("malformed change line {line}: {reason}: {text:?}")]
    MalformedLine {
        line: u32,
        text: String,
        reason: &'static str,
    },

    /// The line names none of the action keywords.
    #[error("unclassifiable change line {line}: no action keyword in {text:?}")]
    UnclassifiableLine { line: u32, text: String },
}

impl EvaluateError {
    /// Stable code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            EvaluateError::MalformedLine { .. } => ids::CODE_MALFORMED_LINE,
            EvaluateError::UnclassifiableLine { .. } => ids::CODE_UNCLASSIFIABLE_LINE,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            EvaluateError::MalformedLine { line, .. } => *line,
            EvaluateError::UnclassifiableLine { line, .. } => *line,
        }
    }
}

/// An aborted evaluation, with the decisions made before the failing line.
#[derive(Clone, Debug, Error)]
#[error("evaluation aborted after {} decision(s)", .decisions.len())]
pub struct EvaluationFailure {
    #[source]
    pub error: EvaluateError,
    pub decisions: Vec<Decision>,
    /// Change lines found in the plan text.
    pub lines_total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_lines() {
        let err = EvaluateError::MalformedLine {
            line: 4,
            text: "#".to_string(),
            reason: "missing resource path",
        };
        assert_eq!(err.code(), ids::CODE_MALFORMED_LINE);
        assert_eq!(err.line(), 4);
        assert!(err.to_string().contains("line 4"));

        let err = EvaluateError::UnclassifiableLine {
            line: 9,
            text: "# data.x.y will be read".to_string(),
        };
        assert_eq!(err.code(), ids::CODE_UNCLASSIFIABLE_LINE);
        assert_eq!(err.line(), 9);
    }

    #[test]
    fn failure_exposes_source() {
        use std::error::Error as _;

        let failure = EvaluationFailure {
            error: EvaluateError::UnclassifiableLine {
                line: 2,
                text: "x".to_string(),
            },
            decisions: Vec::new(),
            lines_total: 2,
        };
        assert_eq!(
            failure.to_string(),
            "evaluation aborted after 0 decision(s)"
        );
        assert!(failure.source().is_some());
    }
}
