use super::config::SessionConfig;
use super::error::SessionError;
use super::snapshot::SessionSnapshot;
use super::state::SessionState;
use crate::api::{PracticeApi, Question};
use crate::scoring::{score_attempt, scoring_target, AttemptResult};
use crate::speech::SpeechCapture;
use crate::timer::{Tick, Ticker, TimerState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Shown when recording ends without any recognised words
pub const NO_SPEECH_NOTICE: &str = "No speech detected. Please try again.";

/// Restricts scoring to one highlighted line of the passage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneLineMode {
    pub enabled: bool,
    pub highlight: Option<String>,
}

/// Controller for one read-aloud practice view
///
/// Owns all session state; every method takes `&mut self`, so the controller
/// is driven from a single task (see [`super::spawn`]).
pub struct PracticeSession {
    /// Session configuration
    config: SessionConfig,

    /// Remote content/attempt service
    api: Arc<dyn PracticeApi>,

    /// Speech-to-text backend
    capture: Box<dyn SpeechCapture>,

    /// Question being practised
    question: Question,

    state: SessionState,

    timer: TimerState,

    /// Drives `timer`; its ticks are fed back through `on_tick`
    ticker: Ticker,

    one_line: OneLineMode,

    /// Latest cumulative transcript while recording
    live_transcript: Option<watch::Receiver<String>>,

    /// Transcript snapshotted when capture stopped
    transcript: String,

    result: Option<AttemptResult>,

    notice: Option<String>,

    attempts_scored: usize,

    opened_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Create a session for an already-loaded question, entering `Prep`.
    pub fn new(
        config: SessionConfig,
        api: Arc<dyn PracticeApi>,
        capture: Box<dyn SpeechCapture>,
        ticker: Ticker,
        question: Question,
    ) -> Self {
        info!(
            "Creating practice session {} for question {} (capture: {})",
            config.session_id,
            question.id,
            capture.name()
        );

        let mut session = Self {
            timer: TimerState::countdown(config.prep_secs),
            config,
            api,
            capture,
            question,
            state: SessionState::Prep,
            ticker,
            one_line: OneLineMode::default(),
            live_transcript: None,
            transcript: String::new(),
            result: None,
            notice: None,
            attempts_scored: 0,
            opened_at: Utc::now(),
        };
        session.enter_prep();
        session
    }

    /// Fetch `question_id` and create a session for it
    pub async fn open(
        config: SessionConfig,
        api: Arc<dyn PracticeApi>,
        capture: Box<dyn SpeechCapture>,
        ticker: Ticker,
        question_id: &str,
    ) -> Result<Self, SessionError> {
        let question = api.fetch_question(question_id).await?;
        Ok(Self::new(config, api, capture, ticker, question))
    }

    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn one_line(&self) -> &OneLineMode {
        &self.one_line
    }

    /// Generation of the running ticker; ticks carrying another value are ignored
    pub fn tick_generation(&self) -> u64 {
        self.ticker.generation()
    }

    pub fn is_clock_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Transcript as the learner currently sees it
    pub fn transcript(&self) -> String {
        match &self.live_transcript {
            Some(live) => live.borrow().clone(),
            None => self.transcript.clone(),
        }
    }

    /// Recording limit for the current mode
    pub fn max_record_secs(&self) -> u32 {
        if self.one_line.enabled {
            self.config.one_line_record_secs
        } else {
            self.config.record_secs
        }
    }

    /// Text the next attempt is scored against
    pub fn scoring_text(&self) -> &str {
        let highlight = if self.one_line.enabled {
            self.one_line.highlight.as_deref()
        } else {
            None
        };
        scoring_target(&self.question.reference_text, highlight)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.config.session_id.clone(),
            question_id: self.question.id.clone(),
            state: self.state,
            timer: self.timer,
            one_line: self.one_line.enabled,
            transcript: self.transcript(),
            result: self.result.clone(),
            notice: self.notice.clone(),
            attempts_scored: self.attempts_scored,
            clock_running: self.ticker.is_running(),
            opened_at: self.opened_at,
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Handle one clock tick
    ///
    /// Stale ticks (from a ticker that has since been restarted or cancelled)
    /// are dropped. When the limit is reached the transition happens on this
    /// same tick.
    pub async fn on_tick(&mut self, tick: Tick) -> Result<(), SessionError> {
        if !self.ticker.is_current(tick) {
            debug!(
                "Ignoring stale tick (generation {}, current {})",
                tick.generation,
                self.ticker.generation()
            );
            return Ok(());
        }

        match self.state {
            SessionState::Prep => {
                if self.timer.advance() {
                    debug!("Prep countdown finished");
                    self.begin_recording().await?;
                }
            }
            SessionState::Recording => {
                if self.timer.advance() {
                    debug!("Recording limit of {}s reached", self.timer.max_time);
                    self.finish_recording().await?;
                }
            }
            SessionState::Submitting | SessionState::Result => {
                self.ticker.cancel();
            }
        }

        Ok(())
    }

    /// Skip the rest of the prep countdown
    pub async fn skip(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionState::Prep, "skip")?;
        self.begin_recording().await
    }

    /// End recording early and submit
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionState::Recording, "stop")?;
        self.finish_recording().await
    }

    /// Try the same question again
    pub async fn redo(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionState::Result, "redo")?;
        self.transition(SessionState::Prep)?;
        self.clear_attempt();
        self.enter_prep();
        Ok(())
    }

    /// Move to the next question
    pub async fn next(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionState::Result, "go to next question")?;
        let target = self.adjacent(self.question.next_id.clone(), "next")?;
        self.navigate(&target).await
    }

    /// Move to the previous question
    pub async fn previous(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionState::Result, "go to previous question")?;
        let target = self.adjacent(self.question.previous_id.clone(), "previous")?;
        self.navigate(&target).await
    }

    /// Toggle one-line mode; resets the attempt
    pub async fn set_one_line(
        &mut self,
        enabled: bool,
        highlight: Option<String>,
    ) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Prep | SessionState::Result) {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "change one-line mode",
            });
        }

        self.one_line = OneLineMode {
            enabled,
            highlight: highlight.filter(|h| !h.trim().is_empty()),
        };
        info!(
            "Session {} one-line mode {}",
            self.config.session_id,
            if enabled { "on" } else { "off" }
        );
        self.reset().await;
        Ok(())
    }

    /// Replace the question, abandoning whatever attempt is in flight
    pub async fn load_question(&mut self, question: Question) {
        info!(
            "Session {} loading question {}",
            self.config.session_id, question.id
        );
        self.teardown().await;
        self.question = question;
        self.clear_attempt();
        self.enter_prep();
    }

    /// Abandon the current attempt from any state and start over in `Prep`
    pub async fn reset(&mut self) {
        debug!("Resetting session {} from {}", self.config.session_id, self.state);
        self.teardown().await;
        self.clear_attempt();
        self.enter_prep();
    }

    /// Stop capture and the clock; the session accepts no further ticks
    pub async fn close(&mut self) {
        info!("Closing practice session {}", self.config.session_id);
        self.teardown().await;
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn ensure(&self, expected: SessionState, action: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            warn!(
                "Rejected '{}' in session {} (state: {})",
                action, self.config.session_id, self.state
            );
            Err(SessionError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    fn transition(&mut self, next: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(next) {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: next.as_str(),
            });
        }
        info!(
            "Session {}: {} -> {}",
            self.config.session_id, self.state, next
        );
        self.state = next;
        Ok(())
    }

    fn enter_prep(&mut self) {
        self.state = SessionState::Prep;
        self.timer = TimerState::countdown(self.config.prep_secs);
        self.ticker.restart();
    }

    /// Prep -> Recording. Capture must start before the transition completes.
    async fn begin_recording(&mut self) -> Result<(), SessionError> {
        self.ticker.cancel();
        self.notice = None;

        let live = match self.capture.start(true).await {
            Ok(live) => live,
            Err(e) => {
                error!(
                    "Session {}: could not start {} capture: {}",
                    self.config.session_id,
                    self.capture.name(),
                    e
                );
                // The clock stays stopped: the learner retries with skip or reset.
                self.notice = Some(e.to_string());
                self.state = SessionState::Prep;
                self.timer = TimerState::countdown(self.config.prep_secs);
                return Err(e.into());
            }
        };

        self.transition(SessionState::Recording)?;
        self.live_transcript = Some(live);
        self.transcript.clear();
        self.timer = TimerState::countup(self.max_record_secs());
        self.ticker.restart();
        Ok(())
    }

    /// Recording -> Submitting -> (Prep | Result)
    async fn finish_recording(&mut self) -> Result<(), SessionError> {
        self.ticker.cancel();

        if let Err(e) = self.capture.stop().await {
            warn!(
                "Session {}: failed to stop capture cleanly: {}",
                self.config.session_id, e
            );
        }

        // Read the cache now; the capture task may still be winding down.
        self.transcript = self
            .live_transcript
            .take()
            .map(|live| live.borrow().trim().to_string())
            .unwrap_or_default();

        self.transition(SessionState::Submitting)?;
        self.submit().await
    }

    async fn submit(&mut self) -> Result<(), SessionError> {
        if self.transcript.is_empty() {
            warn!("Session {}: no speech detected", self.config.session_id);
            self.transition(SessionState::Prep)?;
            self.notice = Some(NO_SPEECH_NOTICE.to_string());
            self.enter_prep();
            return Ok(());
        }

        let local = score_attempt(&self.transcript, self.scoring_text());
        info!(
            "Session {} scored {} (content={}, pronunciation={}, fluency={})",
            self.config.session_id,
            local.score,
            local.content,
            local.pronunciation,
            local.fluency
        );

        self.transition(SessionState::Result)?;
        self.persist(local.clone());
        self.result = Some(local);
        self.attempts_scored += 1;
        Ok(())
    }

    /// Save the attempt on a detached task; the session never waits on it.
    fn persist(&self, result: AttemptResult) {
        let api = Arc::clone(&self.api);
        let session_id = self.config.session_id.clone();
        let question_id = self.question.id.clone();

        tokio::spawn(async move {
            match api.submit_attempt(&question_id, &result).await {
                Ok(record) => debug!(
                    "Session {}: attempt saved (id={:?})",
                    session_id, record.id
                ),
                Err(e) => warn!(
                    "Session {}: failed to save attempt for question {}: {}",
                    session_id, question_id, e
                ),
            }
        });
    }

    fn adjacent(
        &self,
        target: Option<String>,
        direction: &'static str,
    ) -> Result<String, SessionError> {
        target.ok_or_else(|| SessionError::NoAdjacentQuestion {
            question_id: self.question.id.clone(),
            direction,
        })
    }

    async fn navigate(&mut self, question_id: &str) -> Result<(), SessionError> {
        let question = self.api.fetch_question(question_id).await?;
        self.load_question(question).await;
        Ok(())
    }

    async fn teardown(&mut self) {
        self.ticker.cancel();
        if self.live_transcript.take().is_some() || self.capture.is_capturing() {
            if let Err(e) = self.capture.stop().await {
                warn!(
                    "Session {}: failed to stop capture: {}",
                    self.config.session_id, e
                );
            }
        }
    }

    fn clear_attempt(&mut self) {
        self.transcript.clear();
        self.result = None;
        self.notice = None;
    }
}
