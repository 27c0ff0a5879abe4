use reqwest::Client as HttpClient;
use async_trait::async_trait;
use url::Url;
use log::{info, error};
use super::PredictionClient;
use crate::config::RelayConfig;
use crate::models::chat::QuestionPayload;
use crate::relay::error::RelayError;
use crate::relay::extract::UpstreamResponse;

#[derive(Debug, Clone)]
pub struct FlowiseClient {
    http: HttpClient,
    api_url: Url,
}

impl FlowiseClient {
    pub fn new(http: HttpClient, api_url: Url) -> Self {
        Self { http, api_url }
    }

    /// `None` when the config carries no usable URL.
    pub fn from_config(config: &RelayConfig) -> Result<Option<Self>, RelayError> {
        let Some(url) = config.api_url.clone() else {
            return Ok(None);
        };
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Unexpected(format!("failed to build HTTP client: {}", e)))?;
        Ok(Some(Self::new(http, url)))
    }
}

#[async_trait]
impl PredictionClient for FlowiseClient {
    async fn predict(&self, payload: &QuestionPayload) -> Result<UpstreamResponse, RelayError> {
        let resp = self.http.post(self.api_url.clone()).json(payload).send().await?;

        let status = resp.status();
        info!("Flowise response status: {}", status);

        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            error!("Flowise returned {}: {}", status, body);
            return Err(RelayError::UpstreamStatus { status, body });
        }

        let body = resp.text().await?;
        Ok(UpstreamResponse::from_body(&body))
    }
}
