use crate::scoring::AttemptResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A read-aloud question as served by the content service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Passage the learner reads aloud
    pub reference_text: String,

    /// Difficulty label (e.g. "easy", "medium", "hard")
    #[serde(default)]
    pub difficulty: String,

    /// Whether the question is flagged as likely to appear in the real exam
    #[serde(default)]
    pub predictive: bool,

    #[serde(default)]
    pub previous_id: Option<String>,

    #[serde(default)]
    pub next_id: Option<String>,
}

/// A persisted attempt
///
/// The service may either return a stored record or echo the submitted
/// result back, so everything beyond the result itself is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub result: AttemptResult,
}
