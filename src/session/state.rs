use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Silent reading countdown
    Prep,
    /// Capturing speech, clock counting up
    Recording,
    /// Capture stopped, attempt being scored and saved
    Submitting,
    /// Score shown
    Result,
}

impl SessionState {
    /// Whether the attempt state machine allows moving to `next`
    ///
    /// Loading a question is not a transition: it re-enters `Prep` from anywhere.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Prep, Recording)
                | (Recording, Submitting)
                | (Submitting, Prep)
                | (Submitting, Result)
                | (Result, Prep)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Prep => "prep",
            SessionState::Recording => "recording",
            SessionState::Submitting => "submitting",
            SessionState::Result => "result",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState::*;
    use super::*;

    const ALL: [SessionState; 4] = [Prep, Recording, Submitting, Result];

    #[test]
    fn test_only_linear_transitions_allowed() {
        let allowed = [
            (Prep, Recording),
            (Recording, Submitting),
            (Submitting, Prep),
            (Submitting, Result),
            (Result, Prep),
        ];

        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }
}
