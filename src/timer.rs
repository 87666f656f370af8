//! One-second session clock
//!
//! `TimerState` is the countdown/count-up value shown to the learner.
//! `Ticker` drives it: each instance is a short-lived tokio task that emits
//! generation-stamped ticks. Restarting or cancelling bumps the generation so
//! a tick already queued by a torn-down task is recognisably stale.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerDirection {
    Countdown,
    Countup,
}

/// Seconds on the session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Remaining seconds when counting down, elapsed seconds when counting up
    pub time_left: u32,
    pub max_time: u32,
    pub direction: TimerDirection,
}

impl TimerState {
    pub fn countdown(secs: u32) -> Self {
        Self {
            time_left: secs,
            max_time: secs,
            direction: TimerDirection::Countdown,
        }
    }

    pub fn countup(max_secs: u32) -> Self {
        Self {
            time_left: 0,
            max_time: max_secs,
            direction: TimerDirection::Countup,
        }
    }

    /// Advance one second. Returns `true` once the limit is reached.
    pub fn advance(&mut self) -> bool {
        match self.direction {
            TimerDirection::Countdown => {
                self.time_left = self.time_left.saturating_sub(1);
            }
            TimerDirection::Countup => {
                self.time_left = (self.time_left + 1).min(self.max_time);
            }
        }
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        match self.direction {
            TimerDirection::Countdown => self.time_left == 0,
            TimerDirection::Countup => self.time_left >= self.max_time,
        }
    }
}

/// A tick emitted by one ticker instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Owner of the (at most one) running tick task
pub struct Ticker {
    period: Duration,
    generation: u64,
    tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Ticker with the standard one-second period and the receiving end of its ticks
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            period,
            generation: 0,
            tx,
            task: None,
        };
        (ticker, rx)
    }

    /// Tear down the running task (if any) and start a fresh one.
    ///
    /// The first tick arrives one full period after the restart.
    pub fn restart(&mut self) -> u64 {
        self.cancel();

        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));

        debug!("Ticker started (generation {})", generation);
        generation
    }

    /// Stop ticking; any tick still queued becomes stale
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_current(&self, tick: Tick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
