use super::error::ApiError;
use super::messages::{AttemptRecord, Question};
use crate::context::AuthSession;
use crate::scoring::AttemptResult;
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, info};

/// Operations the practice session needs from the content service
#[async_trait::async_trait]
pub trait PracticeApi: Send + Sync {
    /// Fetch a question by id
    async fn fetch_question(&self, question_id: &str) -> Result<Question, ApiError>;

    /// Persist a scored attempt; returns the stored copy (or an echo)
    async fn submit_attempt(
        &self,
        question_id: &str,
        result: &AttemptResult,
    ) -> Result<AttemptRecord, ApiError>;

    /// Attempt history for a question, oldest first
    async fn fetch_attempts(&self, question_id: &str) -> Result<Vec<AttemptRecord>, ApiError>;
}

/// HTTP implementation of [`PracticeApi`]
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    auth: AuthSession,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: AuthSession) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.bearer().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

#[async_trait::async_trait]
impl PracticeApi for ApiClient {
    async fn fetch_question(&self, question_id: &str) -> Result<Question, ApiError> {
        let url = format!("{}/questions/{}", self.base_url, question_id);
        debug!("Fetching question from {}", url);

        let response = self
            .authorize(self.http_client.get(&url))
            .await
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::QuestionNotFound(question_id.to_string()));
        }

        let question = Self::check(response).await?.json::<Question>().await?;
        Ok(question)
    }

    async fn submit_attempt(
        &self,
        question_id: &str,
        result: &AttemptResult,
    ) -> Result<AttemptRecord, ApiError> {
        let url = format!("{}/questions/{}/attempts", self.base_url, question_id);

        let response = self
            .authorize(self.http_client.post(&url).json(result))
            .await
            .send()
            .await?;

        let record = Self::check(response).await?.json::<AttemptRecord>().await?;

        info!(
            "Saved attempt for question {} (score={}, id={:?})",
            question_id, record.result.score, record.id
        );

        Ok(record)
    }

    async fn fetch_attempts(&self, question_id: &str) -> Result<Vec<AttemptRecord>, ApiError> {
        let url = format!("{}/questions/{}/attempts", self.base_url, question_id);

        let response = self
            .authorize(self.http_client.get(&url))
            .await
            .send()
            .await?;

        let attempts = Self::check(response)
            .await?
            .json::<Vec<AttemptRecord>>()
            .await?;
        Ok(attempts)
    }
}
