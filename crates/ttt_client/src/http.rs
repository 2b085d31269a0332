//! HTTP transport for the remote game service.

use crate::error::{ServiceError, ServiceErrorKind};
use crate::service::GameService;
use crate::types::{BoardSnapshot, Position};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Game service reached over HTTP.
///
/// Endpoints, relative to the base URL: `POST init`, `GET state`,
/// `POST engine_move` and `POST manual_move` (cell index as the request body).
#[derive(Debug, Clone)]
pub struct HttpGameService {
    /// Base URL of game server, without trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpGameService {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url, timeout = ?request_timeout))]
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                ServiceError::new(ServiceErrorKind::Transport(e.to_string()))
            })?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Created HTTP game service client");
        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: String) -> Result<reqwest::Response, ServiceError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "text/plain")
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %response.status(), path, "POST completed");
        Ok(response)
    }
}

#[async_trait::async_trait]
impl GameService for HttpGameService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn initialize(&self) -> Result<(), ServiceError> {
        let response = self.post("init", String::new()).await?;
        let ack = response.text().await?;
        info!(ack = %ack, "Game initialized");
        Ok(())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn state(&self) -> Result<BoardSnapshot, ServiceError> {
        let text = self
            .client
            .get(self.endpoint("state"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(response = %text, "State response");

        let values: Vec<i64> = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, response = %text, "State payload is not an integer array");
            ServiceError::new(ServiceErrorKind::MalformedState(format!("{}: {}", e, text)))
        })?;
        BoardSnapshot::from_wire(&values)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn engine_move(&self) -> Result<(), ServiceError> {
        self.post("engine_move", String::new()).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url, position = ?position))]
    async fn manual_move(&self, position: Position) -> Result<(), ServiceError> {
        self.post("manual_move", position.to_index().to_string()).await?;
        Ok(())
    }
}
