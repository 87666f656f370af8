/// Folds partial/final recognizer output into one cumulative transcript.
///
/// Final segments are committed; a partial replaces whatever partial came
/// before it, since recognizers re-send the whole pending utterance.
#[derive(Debug, Default, Clone)]
pub struct TranscriptAccumulator {
    committed: String,
    pending: String,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, text: &str, partial: bool) {
        let text = text.trim();
        if partial {
            self.pending = text.to_string();
            return;
        }

        self.pending.clear();
        if text.is_empty() {
            return;
        }
        if !self.committed.is_empty() {
            self.committed.push(' ');
        }
        self.committed.push_str(text);
    }

    /// Committed text followed by the pending partial
    pub fn current(&self) -> String {
        match (self.committed.is_empty(), self.pending.is_empty()) {
            (_, true) => self.committed.clone(),
            (true, false) => self.pending.clone(),
            (false, false) => format!("{} {}", self.committed, self.pending),
        }
    }
}
