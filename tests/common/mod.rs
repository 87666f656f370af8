// Test doubles for the practice service and speech capture.

#![allow(dead_code)]

use pte_practice::api::{ApiError, AttemptRecord, PracticeApi, Question};
use pte_practice::scoring::AttemptResult;
use pte_practice::speech::{CaptureError, SpeechCapture};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        title: None,
        reference_text: text.to_string(),
        difficulty: "medium".to_string(),
        predictive: false,
        previous_id: None,
        next_id: None,
    }
}

/// In-memory practice service
#[derive(Clone, Default)]
pub struct MockApi {
    questions: Arc<Mutex<HashMap<String, Question>>>,
    submitted: Arc<Mutex<Vec<(String, AttemptResult)>>>,
    fail_submit: Arc<Mutex<bool>>,
}

impl MockApi {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let api = Self::default();
        {
            let mut map = api.questions.lock().unwrap();
            for q in questions {
                map.insert(q.id.clone(), q);
            }
        }
        api
    }

    pub fn fail_submissions(&self) {
        *self.fail_submit.lock().unwrap() = true;
    }

    pub fn submitted(&self) -> Vec<(String, AttemptResult)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PracticeApi for MockApi {
    async fn fetch_question(&self, question_id: &str) -> Result<Question, ApiError> {
        self.questions
            .lock()
            .unwrap()
            .get(question_id)
            .cloned()
            .ok_or_else(|| ApiError::QuestionNotFound(question_id.to_string()))
    }

    async fn submit_attempt(
        &self,
        question_id: &str,
        result: &AttemptResult,
    ) -> Result<AttemptRecord, ApiError> {
        if *self.fail_submit.lock().unwrap() {
            return Err(ApiError::Status {
                status: 500,
                body: "database unavailable".to_string(),
            });
        }
        self.submitted
            .lock()
            .unwrap()
            .push((question_id.to_string(), result.clone()));
        Ok(AttemptRecord {
            id: Some(format!("attempt-{}", self.submitted.lock().unwrap().len())),
            question_id: Some(question_id.to_string()),
            created_at: None,
            result: result.clone(),
        })
    }

    async fn fetch_attempts(&self, question_id: &str) -> Result<Vec<AttemptRecord>, ApiError> {
        Ok(self
            .submitted
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == question_id)
            .map(|(id, result)| AttemptRecord {
                id: None,
                question_id: Some(id.clone()),
                created_at: None,
                result: result.clone(),
            })
            .collect())
    }
}

/// Let detached tasks (attempt saves) run to completion
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Practice service whose attempt saves never complete
#[derive(Clone)]
pub struct HangingApi {
    question: Question,
}

impl HangingApi {
    pub fn new(question: Question) -> Self {
        Self { question }
    }
}

#[async_trait::async_trait]
impl PracticeApi for HangingApi {
    async fn fetch_question(&self, _question_id: &str) -> Result<Question, ApiError> {
        Ok(self.question.clone())
    }

    async fn submit_attempt(
        &self,
        _question_id: &str,
        _result: &AttemptResult,
    ) -> Result<AttemptRecord, ApiError> {
        std::future::pending().await
    }

    async fn fetch_attempts(&self, _question_id: &str) -> Result<Vec<AttemptRecord>, ApiError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct CaptureInner {
    start_calls: usize,
    stop_calls: usize,
    capturing: bool,
    unavailable: bool,
    sender: Option<watch::Sender<String>>,
    /// Transcript published as soon as capture starts
    scripted: String,
}

/// Capture whose transcript is driven by the test
#[derive(Clone, Default)]
pub struct MockCapture {
    inner: Arc<Mutex<CaptureInner>>,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        let capture = Self::default();
        capture.inner.lock().unwrap().unavailable = true;
        capture
    }

    /// Transcript that will be "heard" on the next start
    pub fn script(&self, text: &str) {
        self.inner.lock().unwrap().scripted = text.to_string();
    }

    /// Push a new cumulative transcript while capturing
    pub fn hear(&self, text: &str) {
        if let Some(tx) = &self.inner.lock().unwrap().sender {
            let _ = tx.send(text.to_string());
        }
    }

    pub fn start_calls(&self) -> usize {
        self.inner.lock().unwrap().start_calls
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.lock().unwrap().stop_calls
    }

    pub fn boxed(&self) -> Box<dyn SpeechCapture> {
        Box::new(self.clone())
    }
}

#[async_trait::async_trait]
impl SpeechCapture for MockCapture {
    async fn start(&mut self, _continuous: bool) -> Result<watch::Receiver<String>, CaptureError> {
        let mut inner = self.inner.lock().unwrap();
        inner.start_calls += 1;
        if inner.unavailable {
            return Err(CaptureError::Unavailable("no microphone".to_string()));
        }
        let (tx, rx) = watch::channel(inner.scripted.clone());
        inner.sender = Some(tx);
        inner.capturing = true;
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        let mut inner = self.inner.lock().unwrap();
        inner.stop_calls += 1;
        inner.capturing = false;
        inner.sender = None;
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.inner.lock().unwrap().capturing
    }

    fn name(&self) -> &str {
        "mock"
    }
}
