//! Client for the remote practice content service
//!
//! The service owns questions and attempt history:
//! - GET  /questions/:id - Fetch a question
//! - POST /questions/:id/attempts - Persist a scored attempt
//! - GET  /questions/:id/attempts - Attempt history for a question

mod client;
mod error;
mod messages;

pub use client::{ApiClient, PracticeApi};
pub use error::ApiError;
pub use messages::{AttemptRecord, Question};
