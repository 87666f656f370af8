use crate::config::PracticeConfig;
use serde::{Deserialize, Serialize};

/// Timing for one practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "practice-2f1c...")
    pub session_id: String,

    /// Silent reading countdown before recording starts
    /// Default: 35 seconds
    pub prep_secs: u32,

    /// Recording limit for a full passage
    /// Default: 40 seconds
    pub record_secs: u32,

    /// Recording limit in one-line mode
    /// Default: 15 seconds
    pub one_line_record_secs: u32,
}

impl SessionConfig {
    pub fn from_practice(session_id: impl Into<String>, practice: &PracticeConfig) -> Self {
        Self {
            session_id: session_id.into(),
            prep_secs: practice.prep_secs,
            record_secs: practice.record_secs,
            one_line_record_secs: practice.one_line_record_secs,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_practice(
            format!("practice-{}", uuid::Uuid::new_v4()),
            &PracticeConfig::default(),
        )
    }
}
