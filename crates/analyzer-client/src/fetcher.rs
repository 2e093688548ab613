use analyzer_core::error::AppError;
use analyzer_core::models::FetchedPage;
use analyzer_core::traits::Fetcher;
use reqwest::Client;
use reqwest::redirect::Policy;

use crate::config::FetcherConfig;

/// HTTP fetcher using reqwest.
///
/// Issues exactly one GET per call, bounded by the configured timeout.
/// Every status the server answers with, 4xx and 5xx included, is returned
/// as a [`FetchedPage`]. Transport failures collapse into
/// [`AppError::FetchFailed`] with a log-worthy reason.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: f64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(&FetcherConfig::default())
    }

    pub fn with_config(config: &FetcherConfig) -> Result<Self, AppError> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(redirect)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout.as_secs_f64(),
        })
    }

    fn describe(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("request timed out after {}s", self.timeout_secs)
        } else if e.is_redirect() {
            "too many redirects".to_string()
        } else if e.is_connect() {
            format!("connection failed: {e}")
        } else {
            e.to_string()
        }
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FetchFailed(self.describe(&e)))?;

        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AppError::FetchFailed(format!("failed to read response body: {}", self.describe(&e)))
        })?;

        tracing::debug!(url, status_code, bytes = body.len(), "GET complete");
        Ok(FetchedPage { status_code, body })
    }
}
