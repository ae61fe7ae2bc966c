//! Forensic report backend client and builder.

use hyperion_types::{
    ForensicReport, ForensicReportRequest, ForensicsError, HealthStatus, ReportStream,
};

use crate::config::{BackendConfig, ExecutionContext};
use crate::error::{map_http_status, map_reqwest_error};
use crate::streaming::demultiplex;

/// Client for the forensic report backend.
///
/// Every call is an independent exchange; a client can serve any number of
/// concurrent sessions and a failed session leaves nothing behind.
///
/// # Example
///
/// ```no_run
/// use hyperion_forensics::{BackendConfig, ExecutionContext, ForensicsClient};
///
/// let config = BackendConfig::from_env();
/// let client = ForensicsClient::from_config(&config, ExecutionContext::Server);
/// ```
#[derive(Debug, Clone)]
pub struct ForensicsClient {
    /// Backend base URL, without a trailing slash.
    pub(crate) base_url: String,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl ForensicsClient {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client for the URL `config` assigns to `context`.
    #[must_use]
    pub fn from_config(config: &BackendConfig, context: ExecutionContext) -> Self {
        Self::new(config.base_url(context))
    }

    /// Override the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize(url.into());
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, TLS roots).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Stream a report as it is generated.
    ///
    /// Validation runs first and fails without any I/O. A non-success status
    /// fails here with [`ForensicsError::Backend`] carrying the full body; no
    /// streaming is attempted. Otherwise the returned [`ReportStream`] yields
    /// report chunks until the backend signals completion or failure.
    pub async fn stream(
        &self,
        request: &ForensicReportRequest,
    ) -> Result<ReportStream, ForensicsError> {
        request.validate()?;
        let url = self.endpoint("/forensics/stream");

        tracing::debug!(
            url = %url,
            policy_id = request.oracle_payload.policy_id.as_deref().unwrap_or_default(),
            "sending streaming report request"
        );

        let response = self
            .client
            .post(&url)
            .header("accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(map_reqwest_error)?;
            tracing::warn!(status = status.as_u16(), "report stream rejected");
            return Err(map_http_status(status, body));
        }

        Ok(demultiplex(response.bytes_stream()))
    }

    /// Generate a whole report in one exchange.
    pub async fn generate(
        &self,
        request: &ForensicReportRequest,
    ) -> Result<ForensicReport, ForensicsError> {
        request.validate()?;
        let url = self.endpoint("/forensics/generate");

        tracing::debug!(
            url = %url,
            policy_id = request.oracle_payload.policy_id.as_deref().unwrap_or_default(),
            "sending report request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "report request rejected");
            return Err(map_http_status(status, body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ForensicsError::InvalidResponse(format!("invalid JSON response: {e}")))
    }

    /// Ask the backend for its health.
    ///
    /// Never fails: any transport, status, or decoding problem yields
    /// [`HealthStatus::offline`].
    pub async fn health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(error = %err, "backend health check failed");
                HealthStatus::offline()
            }
        }
    }

    async fn fetch_health(&self) -> Result<HealthStatus, ForensicsError> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(map_http_status(status, body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ForensicsError::InvalidResponse(format!("invalid health response: {e}")))
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
