//! Telegram Bot API notifier
//!
//! Requires TELEGRAM_TOKEN and TELEGRAM_CHAT_ID. Without them the notifier
//! runs in dry-run mode and only logs what it would have sent.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::NewsError;
use crate::source::Notifier;

/// Bot credentials
#[derive(Debug, Clone)]
pub struct TelegramCredentials {
    pub token: String,
    pub chat_id: String,
}

impl TelegramCredentials {
    /// Read credentials from the environment; `None` when either is missing or blank
    pub fn from_env() -> Option<Self> {
        let token = env::var("TELEGRAM_TOKEN").ok().filter(|t| !t.trim().is_empty())?;
        let chat_id = env::var("TELEGRAM_CHAT_ID").ok().filter(|c| !c.trim().is_empty())?;
        Some(Self { token, chat_id })
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Telegram notifier
pub struct TelegramNotifier {
    client: Client,
    credentials: Option<TelegramCredentials>,
    base_url: String,
}

impl TelegramNotifier {
    /// Create a notifier; `None` credentials selects dry-run mode
    pub fn new(credentials: Option<TelegramCredentials>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            credentials,
            base_url: "https://api.telegram.org".to_string(),
        }
    }

    /// Create a notifier from TELEGRAM_* environment variables
    pub fn from_env(timeout: Duration) -> Self {
        Self::new(TelegramCredentials::from_env(), timeout)
    }

    /// Point the client at a different Bot API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether messages are actually delivered
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    #[instrument(skip(self, message), fields(len = message.len()))]
    async fn notify(&self, message: &str) -> Result<(), NewsError> {
        let Some(creds) = &self.credentials else {
            info!("Would notify (missing TELEGRAM_* env):\n{}", message);
            return Ok(());
        };

        let request = SendMessageRequest {
            chat_id: &creds.chat_id,
            text: message,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.base_url, creds.token))
            .json(&request)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Telegram message delivered");
        Ok(())
    }
}
