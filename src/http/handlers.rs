use super::state::AppState;
use crate::api::ApiError;
use crate::session::{
    spawn, PracticeSession, SessionAction, SessionConfig, SessionError, SessionHandle,
};
use crate::speech::CaptureError;
use crate::timer::Ticker;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    /// Question to practise
    pub question_id: String,

    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OneLineRequest {
    pub enabled: bool,

    /// Line of the passage to score against
    pub highlight: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn session_error_response(e: SessionError) -> Response {
    let status = match &e {
        SessionError::InvalidTransition { .. } | SessionError::NoAdjacentQuestion { .. } => {
            StatusCode::CONFLICT
        }
        SessionError::Capture(CaptureError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::Capture(CaptureError::Transport(_)) => StatusCode::BAD_GATEWAY,
        SessionError::Api(ApiError::QuestionNotFound(_)) => StatusCode::NOT_FOUND,
        SessionError::Api(_) => StatusCode::BAD_GATEWAY,
        SessionError::Closed(_) => StatusCode::GONE,
    };
    error_response(status, e.to_string())
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

async fn find_session(state: &AppState, session_id: &str) -> Option<SessionHandle> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).cloned()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /practice/sessions
/// Open a practice session for a question
pub async fn open_session(
    State(state): State<AppState>,
    Json(req): Json<OpenSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("practice-{}", uuid::Uuid::new_v4()));

    info!(
        "Opening session {} for question {}",
        session_id, req.question_id
    );

    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return error_response(
                StatusCode::CONFLICT,
                format!("Session {} is already open", session_id),
            );
        }
    }

    let config = SessionConfig::from_practice(session_id.clone(), &state.ctx.config.practice);
    let capture = (state.capture)(&session_id);
    let (ticker, ticks) = Ticker::new();

    let session = match PracticeSession::open(
        config,
        state.ctx.api.clone(),
        capture,
        ticker,
        &req.question_id,
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to open session {}: {}", session_id, e);
            return session_error_response(e);
        }
    };

    let handle = spawn(session, ticks);
    let snapshot = match handle.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return session_error_response(e),
    };

    // Another request may have opened the same id while the question loaded.
    let inserted = {
        let mut sessions = state.sessions.write().await;
        match sessions.entry(session_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(handle.clone());
                true
            }
        }
    };

    if !inserted {
        warn!("Session {} was opened concurrently; discarding", session_id);
        if let Err(e) = handle.close().await {
            warn!("Failed to close duplicate session {}: {}", session_id, e);
        }
        return error_response(
            StatusCode::CONFLICT,
            format!("Session {} is already open", session_id),
        );
    }

    (StatusCode::OK, Json(snapshot)).into_response()
}

/// GET /practice/sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(handle) = find_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match handle.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// DELETE /practice/sessions/:session_id
/// Close a session, stopping any capture in flight
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let handle = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    let Some(handle) = handle else {
        return session_not_found(&session_id);
    };

    match handle.close().await {
        Ok(snapshot) => {
            info!("Session {} closed", session_id);
            (StatusCode::OK, Json(snapshot)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

async fn run_action(state: AppState, session_id: String, action: SessionAction) -> Response {
    let Some(handle) = find_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match handle.apply(action.clone()).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            warn!("Session {}: {:?} failed: {}", session_id, action, e);
            session_error_response(e)
        }
    }
}

/// POST /practice/sessions/:session_id/skip
pub async fn skip(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Skip).await
}

/// POST /practice/sessions/:session_id/stop
pub async fn stop(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Stop).await
}

/// POST /practice/sessions/:session_id/redo
pub async fn redo(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Redo).await
}

/// POST /practice/sessions/:session_id/next
pub async fn next(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Next).await
}

/// POST /practice/sessions/:session_id/previous
pub async fn previous(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Previous).await
}

/// POST /practice/sessions/:session_id/reset
pub async fn reset(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    run_action(state, session_id, SessionAction::Reset).await
}

/// POST /practice/sessions/:session_id/one-line
pub async fn set_one_line(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<OneLineRequest>,
) -> Response {
    let action = SessionAction::SetOneLine {
        enabled: req.enabled,
        highlight: req.highlight,
    };
    run_action(state, session_id, action).await
}

/// GET /practice/questions/:question_id/attempts
/// Attempt history from the practice service
pub async fn get_attempts(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> impl IntoResponse {
    match state.ctx.api.fetch_attempts(&question_id).await {
        Ok(attempts) => (StatusCode::OK, Json(attempts)).into_response(),
        Err(e) => {
            error!("Failed to fetch attempts for {}: {}", question_id, e);
            session_error_response(SessionError::Api(e))
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
