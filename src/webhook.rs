use crate::config::Settings;
use crate::models::{ReportGoal, WebhookPayload};
use crate::report::{Report, ShapeError};
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::debug;

#[derive(Debug)]
pub enum WebhookError {
    Timeout,
    Transport(reqwest::Error),
    Status(StatusCode),
    InvalidJson(serde_json::Error),
    Shape(ShapeError),
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "The request took too long to complete"),
            Self::Transport(err) => write!(f, "Webhook request failed: {err}"),
            Self::Status(status) => write!(f, "Webhook request failed with status: {}", status.as_u16()),
            Self::InvalidJson(_) => write!(f, "Invalid JSON response from webhook"),
            Self::Shape(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WebhookError {}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(settings.webhook_timeout)
            .build()?;
        Ok(Self {
            http,
            url: settings.webhook_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One delivery attempt; the caller owns retries.
    pub async fn send(&self, payload: &WebhookPayload, goal: ReportGoal) -> Result<Report, WebhookError> {
        let response = self
            .http
            .post(&self.url)
            .header("X-Request-ID", payload.report_id.as_str())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status));
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|err| {
            debug!(report_id = %payload.report_id, body = %text, "unparsable webhook body");
            WebhookError::InvalidJson(err)
        })?;

        Report::from_webhook(goal, body).map_err(WebhookError::Shape)
    }
}
