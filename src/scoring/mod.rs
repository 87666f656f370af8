//! Heuristic read-aloud scoring
//!
//! Maps a spoken transcript and a reference passage to a three-axis score
//! (content, pronunciation, fluency) by exact word-position matching.
//! Pure and deterministic: no I/O, no clock.

mod feedback;
mod scorer;
mod types;

pub use feedback::compose_feedback;
pub use scorer::{score_attempt, scoring_target, tokenize, MAX_SUBSCORE, MAX_TOTAL_SCORE};
pub use types::{AttemptResult, WordAnalysis, WordStatus};
