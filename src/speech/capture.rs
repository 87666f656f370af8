use super::nats::NatsSpeechCapture;
use crate::config::{SpeechConfig, SpeechSource};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// No recognizer can be reached; nothing can be scored
    #[error("speech recognition unavailable: {0}")]
    Unavailable(String),

    #[error("speech capture failed: {0}")]
    Transport(String),
}

/// Continuous speech-to-text capture
///
/// Implementations:
/// - NATS: transcripts published by the STT service
/// - Unavailable: placeholder when no recognizer is configured
#[async_trait::async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Start capturing
    ///
    /// Returns a receiver that always holds the cumulative transcript of the
    /// current capture (not deltas).
    async fn start(&mut self, continuous: bool) -> Result<watch::Receiver<String>, CaptureError>;

    /// Stop capturing; the last value on the receiver is final
    async fn stop(&mut self) -> Result<(), CaptureError>;

    fn is_capturing(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

pub struct SpeechCaptureFactory;

impl SpeechCaptureFactory {
    /// Create the configured backend for one practice session
    pub fn create(config: &SpeechConfig, session_id: &str) -> Box<dyn SpeechCapture> {
        match config.source {
            SpeechSource::Nats => Box::new(NatsSpeechCapture::new(
                config.nats_url.clone(),
                session_id.to_string(),
            )),
            SpeechSource::Unavailable => Box::new(UnavailableCapture),
        }
    }
}

/// Backend used when no recognizer is configured
pub struct UnavailableCapture;

#[async_trait::async_trait]
impl SpeechCapture for UnavailableCapture {
    async fn start(&mut self, _continuous: bool) -> Result<watch::Receiver<String>, CaptureError> {
        Err(CaptureError::Unavailable(
            "no speech recognizer configured".to_string(),
        ))
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
