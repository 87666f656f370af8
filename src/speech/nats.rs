use super::capture::{CaptureError, SpeechCapture};
use super::transcript::TranscriptAccumulator;
use crate::nats::{NatsClient, TranscriptMessage};
use futures::stream::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capture backed by the STT service's NATS transcript stream
pub struct NatsSpeechCapture {
    nats_url: String,
    session_id: String,
    client: Option<NatsClient>,
    transcript_task: Option<JoinHandle<()>>,
    latest: Option<watch::Receiver<String>>,
}

impl NatsSpeechCapture {
    pub fn new(nats_url: String, session_id: String) -> Self {
        Self {
            nats_url,
            session_id,
            client: None,
            transcript_task: None,
            latest: None,
        }
    }

    async fn client(&mut self) -> Result<&NatsClient, CaptureError> {
        if self.client.is_none() {
            let client = NatsClient::connect(&self.nats_url)
                .await
                .map_err(|e| CaptureError::Unavailable(format!("{:#}", e)))?;
            self.client = Some(client);
        }

        self.client
            .as_ref()
            .ok_or_else(|| CaptureError::Unavailable("NATS client missing".to_string()))
    }
}

#[async_trait::async_trait]
impl SpeechCapture for NatsSpeechCapture {
    async fn start(&mut self, continuous: bool) -> Result<watch::Receiver<String>, CaptureError> {
        if let (Some(_), Some(latest)) = (&self.transcript_task, &self.latest) {
            warn!("Speech capture already started");
            return Ok(latest.clone());
        }

        let session_id = self.session_id.clone();
        let mut subscriber = self
            .client()
            .await?
            .subscribe_transcripts()
            .await
            .map_err(|e| CaptureError::Transport(format!("{:#}", e)))?;

        let (tx, rx) = watch::channel(String::new());

        let task = tokio::spawn(async move {
            info!("Transcript receiving task started for {}", session_id);
            let mut transcript = TranscriptAccumulator::new();

            while let Some(msg) = subscriber.next().await {
                let message = match serde_json::from_slice::<TranscriptMessage>(&msg.payload) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Failed to parse transcript message: {}", e);
                        continue;
                    }
                };

                if message.session_id != session_id {
                    continue;
                }

                debug!(
                    "Transcript (partial={}, confidence={:?}): {}",
                    message.partial, message.confidence, message.text
                );

                transcript.apply(&message.text, message.partial);
                if tx.send(transcript.current()).is_err() {
                    break;
                }

                if !continuous && !message.partial {
                    break;
                }
            }

            info!("Transcript receiving task stopped for {}", session_id);
        });

        self.transcript_task = Some(task);
        self.latest = Some(rx.clone());

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if let Some(task) = self.transcript_task.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Transcript task failed: {}", e);
                }
            }
        }
        self.latest = None;
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.transcript_task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "nats"
    }
}
