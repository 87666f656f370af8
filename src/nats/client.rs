use super::messages::TRANSCRIPT_SUBJECT;
use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Subscribe to transcript messages
    ///
    /// Partial and final transcripts for every session arrive on the same
    /// wildcard; callers filter by `session_id` in the payload.
    pub async fn subscribe_transcripts(&self) -> Result<async_nats::Subscriber> {
        info!("Subscribing to transcripts on {}", TRANSCRIPT_SUBJECT);

        let subscriber = self
            .client
            .subscribe(TRANSCRIPT_SUBJECT)
            .await
            .context("Failed to subscribe to transcripts")?;

        Ok(subscriber)
    }
}
