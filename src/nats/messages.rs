use serde::{Deserialize, Serialize};

/// Subject the STT service publishes on (`stt.text.partial`, `stt.text.final`)
pub const TRANSCRIPT_SUBJECT: &str = "stt.text.>";

/// Transcript message received from STT service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub session_id: String,
    pub text: String,
    pub partial: bool,
    pub timestamp: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}
