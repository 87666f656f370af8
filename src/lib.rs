pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod http;
pub mod nats;
pub mod scoring;
pub mod session;
pub mod speech;
pub mod timer;

pub use api::{ApiClient, ApiError, AttemptRecord, PracticeApi, Question};
pub use config::Config;
pub use context::{AppContext, AuthSession};
pub use http::{create_router, AppState};
pub use nats::{NatsClient, TranscriptMessage};
pub use scoring::{score_attempt, AttemptResult, WordAnalysis, WordStatus};
pub use session::{
    spawn, PracticeSession, SessionAction, SessionConfig, SessionError, SessionHandle,
    SessionSnapshot, SessionState,
};
pub use speech::{CaptureError, SpeechCapture, SpeechCaptureFactory};
pub use timer::{Tick, Ticker, TimerDirection, TimerState};
