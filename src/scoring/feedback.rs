use super::types::{WordAnalysis, WordStatus};

const MAX_MISSED_LISTED: usize = 5;

/// Short learner-facing summary of an attempt
pub fn compose_feedback(accuracy: f64, analysis: &[WordAnalysis]) -> String {
    let headline = if accuracy >= 0.9 {
        "Excellent reading! Nearly every word matched the passage."
    } else if accuracy >= 0.7 {
        "Good attempt. Most of the passage came through clearly."
    } else if accuracy >= 0.4 {
        "Fair attempt. Several words were missed or out of place."
    } else {
        "Keep practising. Read at a steady pace and follow the passage word by word."
    };

    let missed: Vec<&str> = analysis
        .iter()
        .filter(|w| w.status == WordStatus::Bad)
        .map(|w| w.word.as_str())
        .take(MAX_MISSED_LISTED)
        .collect();

    if missed.is_empty() {
        headline.to_string()
    } else {
        format!("{} Focus on: {}.", headline, missed.join(", "))
    }
}
