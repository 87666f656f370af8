use super::state::SessionState;
use crate::api::ApiError;
use crate::speech::CaptureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot {action} while session is in {state}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },

    #[error("question {question_id} has no {direction} question")]
    NoAdjacentQuestion {
        question_id: String,
        direction: &'static str,
    },

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session {0} is closed")]
    Closed(String),
}
