use thiserror::Error;

/// Failures talking to the model gateway. None of these are recoverable inside
/// the loop; they abort the run and surface to the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request to model provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Model provider timed out")]
    Timeout,

    #[error("Rate limited by model provider: {0}")]
    RateLimited(String),

    #[error("Server error: {status}")]
    Server { status: u16 },

    #[error("Request failed: {status}\nBody: {body}")]
    Request { status: u16, body: String },

    #[error("Context length exceeded. Message: {0}")]
    ContextLengthExceeded(String),

    #[error("Model provider API error: {0}")]
    Api(String),

    #[error("Malformed response from model provider: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else {
            GatewayError::Transport(err)
        }
    }
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("No final answer after {max_turns} turns")]
    TurnBudgetExceeded { max_turns: usize },

    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

impl AgentError {
    pub fn is_turn_budget_exceeded(&self) -> bool {
        matches!(self, AgentError::TurnBudgetExceeded { .. })
    }
}

pub type AgentResult<T> = Result<T, AgentError>;
