use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown action: {0}")]
    UnknownTool(String),

    #[error("Action {tool} failed on input \"{argument}\": {source}")]
    Execution {
        tool: String,
        argument: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
