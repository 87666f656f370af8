use crate::context::AppContext;
use crate::session::SessionHandle;
use crate::speech::{SpeechCapture, SpeechCaptureFactory};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Builds the capture backend for a new session (argument: session id)
pub type CaptureProvider = Arc<dyn Fn(&str) -> Box<dyn SpeechCapture> + Send + Sync>;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,

    /// Open practice sessions (session_id → handle)
    pub sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,

    pub capture: CaptureProvider,
}

impl AppState {
    /// State using the capture backend named in the configuration
    pub fn new(ctx: AppContext) -> Self {
        let speech = ctx.config.speech.clone();
        let capture: CaptureProvider =
            Arc::new(move |session_id: &str| SpeechCaptureFactory::create(&speech, session_id));
        Self::with_capture(ctx, capture)
    }

    pub fn with_capture(ctx: AppContext, capture: CaptureProvider) -> Self {
        Self {
            ctx,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capture,
        }
    }
}
