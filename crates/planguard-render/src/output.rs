/// How the approval flag is published to the surrounding pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `name=value` on stdout.
    #[default]
    Plain,
    /// `name=value` appended to the `$GITHUB_OUTPUT` file.
    Github,
    /// Azure Pipelines `task.setvariable` logging command.
    Azure,
    None,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Github => "github",
            OutputFormat::Azure => "azure",
            OutputFormat::None => "none",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "plain" => Some(OutputFormat::Plain),
            "github" | "gha" => Some(OutputFormat::Github),
            "azure" | "azure-pipelines" => Some(OutputFormat::Azure),
            "none" => Some(OutputFormat::None),
            _ => None,
        }
    }
}

/// The line publishing `name` = `approval_required`, without a trailing newline.
///
/// Returns `None` for [`OutputFormat::None`].
pub fn render_output_variable(
    format: OutputFormat,
    name: &str,
    approval_required: bool,
) -> Option<String> {
    match format {
        OutputFormat::Plain | OutputFormat::Github => Some(format!("{name}={approval_required}")),
        OutputFormat::Azure => Some(format!(
            "##vso[task.setvariable variable={name};isOutput=true]{approval_required}"
        )),
        OutputFormat::None => None,
    }
}
