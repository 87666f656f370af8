//! Speech capture adapters
//!
//! A capture backend turns a live speech-to-text stream into one
//! always-current cumulative transcript, published through a
//! `tokio::sync::watch` channel so the session can read the latest value
//! synchronously when recording ends.

mod capture;
mod nats;
mod transcript;

pub use capture::{CaptureError, SpeechCapture, SpeechCaptureFactory, UnavailableCapture};
pub use nats::NatsSpeechCapture;
pub use transcript::TranscriptAccumulator;
