#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableOutcome {
    NoChanges,
    Evaluated,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDecision {
    pub line: u32,
    pub resource_path: String,
    pub resource_type: String,
    pub action: String,
    pub requires_approval: bool,
    pub matched: String,
    pub code: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableError {
    pub code: String,
    pub message: String,
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub lines_total: u32,
    pub lines_evaluated: u32,
    pub short_circuited: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub approval_required: bool,
    pub outcome: RenderableOutcome,
    pub decisions: Vec<RenderableDecision>,
    pub error: Option<RenderableError>,
    pub data: RenderableData,
}
