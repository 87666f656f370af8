//! HTTP API for driving practice sessions from a UI shell
//!
//! - POST   /practice/sessions - Open a session for a question
//! - GET    /practice/sessions/:id - Session snapshot
//! - POST   /practice/sessions/:id/{skip,stop,redo,next,previous,reset} - Learner actions
//! - POST   /practice/sessions/:id/one-line - Toggle one-line mode
//! - DELETE /practice/sessions/:id - Close a session
//! - GET    /practice/questions/:id/attempts - Attempt history
//! - GET    /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{AppState, CaptureProvider};
