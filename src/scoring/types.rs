use serde::{Deserialize, Serialize};

/// Per-word verdict used to render pronunciation feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Good,
    Bad,
    /// Only produced by the remote scorer; the local heuristic is binary.
    Average,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnalysis {
    pub word: String,
    pub status: WordStatus,
}

/// Outcome of one completed attempt
///
/// `score` is always `content + pronunciation + fluency`, each sub-score in `0..=5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub score: u32,
    pub content: u32,
    pub pronunciation: u32,
    pub fluency: u32,
    pub transcript: String,
    /// One entry per reference word, by position
    pub word_analysis: Vec<WordAnalysis>,
    #[serde(default)]
    pub ai_feedback: String,
}
