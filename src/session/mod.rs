//! Read-aloud practice session
//!
//! This module provides the `PracticeSession` controller that manages:
//! - The prep -> recording -> submitting -> result state machine
//! - The preparation countdown and recording count-up
//! - Speech capture start/stop and the final transcript snapshot
//! - Scoring and best-effort persistence of each attempt
//!
//! `spawn` runs a controller on its own task behind a `SessionHandle`.

mod config;
mod controller;
mod error;
mod handle;
mod snapshot;
mod state;

pub use config::SessionConfig;
pub use controller::{OneLineMode, PracticeSession, NO_SPEECH_NOTICE};
pub use error::SessionError;
pub use handle::{spawn, SessionAction, SessionHandle};
pub use snapshot::SessionSnapshot;
pub use state::SessionState;
