use super::state::SessionState;
use crate::scoring::AttemptResult;
use crate::timer::TimerState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a practice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,

    pub question_id: String,

    pub state: SessionState,

    pub timer: TimerState,

    /// Whether scoring is restricted to a highlighted line
    pub one_line: bool,

    /// Live transcript while recording, frozen transcript afterwards
    pub transcript: String,

    /// Result of the last completed attempt
    pub result: Option<AttemptResult>,

    /// Last message for the learner (e.g. no speech detected)
    pub notice: Option<String>,

    /// Number of attempts scored in this session
    pub attempts_scored: usize,

    /// Whether the prep/recording clock is ticking
    pub clock_running: bool,

    pub opened_at: DateTime<Utc>,
}
