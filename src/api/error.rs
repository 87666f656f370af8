use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to practice service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("practice service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("question {0} not found")]
    QuestionNotFound(String),
}
