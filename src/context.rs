//! Process-wide context
//!
//! Built once in `main` and handed to every session and HTTP handler.

use crate::api::{ApiClient, PracticeApi};
use crate::config::Config;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Credentials of the signed-in learner
///
/// Cloning shares the same underlying slot.
#[derive(Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Current bearer token, if signed in
    pub async fn bearer(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        info!("Learner signed in");
    }

    pub async fn sign_out(&self) {
        *self.token.write().await = None;
        info!("Learner signed out");
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub auth: AuthSession,
    pub api: Arc<dyn PracticeApi>,
}

impl AppContext {
    /// Context talking to the configured practice service
    pub fn from_config(config: Config) -> Self {
        let auth = AuthSession::new(config.api.token.clone());
        let api = Arc::new(ApiClient::new(config.api.base_url.clone(), auth.clone()));
        Self::new(config, auth, api)
    }

    pub fn new(config: Config, auth: AuthSession, api: Arc<dyn PracticeApi>) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            api,
        }
    }
}
