use super::feedback::compose_feedback;
use super::types::{AttemptResult, WordAnalysis, WordStatus};

/// Upper bound for each of content, pronunciation and fluency
pub const MAX_SUBSCORE: u32 = 5;

/// Upper bound for the summed score
pub const MAX_TOTAL_SCORE: u32 = MAX_SUBSCORE * 3;

const CONTENT_WEIGHT: f64 = 1.0;
const PRONUNCIATION_WEIGHT: f64 = 1.1;
const FLUENCY_WEIGHT: f64 = 0.9;

/// Lower-case and split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Pick the text an attempt is scored against.
///
/// In one-line mode the learner highlights part of the passage; the highlight
/// is used when it is non-empty and actually occurs in the reference.
pub fn scoring_target<'a>(reference: &'a str, highlight: Option<&'a str>) -> &'a str {
    match highlight.map(str::trim) {
        Some(h) if !h.is_empty() && reference.contains(h) => h,
        _ => reference,
    }
}

/// Score a transcript against a reference passage.
///
/// Word `i` of the reference is `good` only if word `i` of the transcript is
/// the same word (case-insensitive). There is no realignment, so one dropped
/// or inserted word shifts every later position.
pub fn score_attempt(transcript: &str, reference: &str) -> AttemptResult {
    let spoken = tokenize(transcript);
    let expected = tokenize(reference);

    let word_analysis: Vec<WordAnalysis> = expected
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let status = if spoken.get(i) == Some(word) {
                WordStatus::Good
            } else {
                WordStatus::Bad
            };
            WordAnalysis {
                word: word.clone(),
                status,
            }
        })
        .collect();

    let good = word_analysis
        .iter()
        .filter(|w| w.status == WordStatus::Good)
        .count();
    let accuracy = content_accuracy(good, expected.len());

    let content = band(accuracy, CONTENT_WEIGHT);
    let pronunciation = band(accuracy, PRONUNCIATION_WEIGHT);
    let fluency = band(accuracy, FLUENCY_WEIGHT);

    AttemptResult {
        score: content + pronunciation + fluency,
        content,
        pronunciation,
        fluency,
        transcript: transcript.trim().to_string(),
        ai_feedback: compose_feedback(accuracy, &word_analysis),
        word_analysis,
    }
}

fn content_accuracy(good: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    good as f64 / total as f64
}

/// Rounds half away from zero (4.5 -> 5), then clamps to `0..=MAX_SUBSCORE`.
fn band(accuracy: f64, weight: f64) -> u32 {
    let max = f64::from(MAX_SUBSCORE);
    (accuracy * max * weight).round().clamp(0.0, max) as u32
}
