use axum::http::StatusCode;
use thiserror::Error;

pub const EMPTY_INPUT_ANSWER: &str = "Please enter your question.";
pub const NO_ANSWER: &str = "I couldn't come up with an answer.";
pub const INTERNAL_ERROR_ANSWER: &str = "Internal server error while processing your question.";

const PROBLEM_PREFIX: &str = "Sorry, I ran into a problem";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Flowise API URL is not configured")]
    Configuration,

    #[error("network error while contacting Flowise: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Flowise responded with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("Flowise reported an error: {0}")]
    UpstreamReported(String),

    #[error("no message provided")]
    EmptyInput,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::EmptyInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing text. Network and unexpected failures keep their detail in the log only.
    pub fn answer(&self) -> String {
        let detail = match self {
            RelayError::EmptyInput => return EMPTY_INPUT_ANSWER.to_string(),
            RelayError::Configuration => "The AI service URL is not configured correctly.".to_string(),
            RelayError::Network(_) => "Could not connect to the AI server.".to_string(),
            RelayError::UpstreamStatus { status, body } => {
                format!("AI service error ({}): {}", status.as_u16(), body)
            }
            RelayError::UpstreamReported(msg) => msg.clone(),
            RelayError::Unexpected(_) => "An internal error occurred while processing.".to_string(),
        };
        format!("{}: {}", PROBLEM_PREFIX, detail)
    }
}
