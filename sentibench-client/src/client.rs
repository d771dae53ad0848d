//! HTTP client implementation for the sentiment service

use crate::errors::ClientError;
use crate::types::{AnalysisRequest, AnalysisResult, RawAnalysis};
use reqwest::Client;
use sentibench_config::{HttpConfig, ServiceConfig};
use std::time::Instant;
use tracing::{debug, info};

/// Client trait for the remote sentiment-analysis service
///
/// The service is an opaque collaborator; implementations only move bytes
/// and never compute sentiment themselves.
#[async_trait::async_trait]
pub trait SentimentService: Send + Sync {
    /// Analyze one text and decode the typed result
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError>;

    /// Analyze one text and report what was observed on the wire.
    ///
    /// Unlike [`analyze`](Self::analyze), this never errors on a bad status
    /// or a malformed body; only transport failures (connect errors,
    /// timeouts) surface as `Err`.
    async fn analyze_raw(&self, text: &str) -> Result<RawAnalysis, ClientError>;

    /// Probe the health endpoint, returning the HTTP status code
    async fn health(&self) -> Result<u16, ClientError>;
}

/// reqwest-backed implementation of [`SentimentService`]
#[derive(Debug, Clone)]
pub struct HttpSentimentService {
    client: Client,
    analyze_url: String,
    health_url: String,
}

impl HttpSentimentService {
    /// Build a service client from configuration
    pub fn from_config(http: &HttpConfig, service: &ServiceConfig) -> Result<Self, ClientError> {
        debug!(
            "Creating sentiment service client with {}s timeout",
            http.timeout.as_secs()
        );

        let client = Client::builder()
            .timeout(http.timeout)
            .user_agent(&http.user_agent)
            .danger_accept_invalid_certs(!http.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                http.max_redirects as usize,
            ))
            .build()?;

        Ok(Self {
            client,
            analyze_url: service.analyze_url(),
            health_url: service.health_url(),
        })
    }

    /// Target URL of the analyze endpoint
    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

#[async_trait::async_trait]
impl SentimentService for HttpSentimentService {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        debug!("Posting analyze request to {}", self.analyze_url);

        let response = self
            .client
            .post(&self.analyze_url)
            .json(&AnalysisRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            info!("Analyze request rejected with status {}", status.as_u16());
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let result: AnalysisResult = serde_json::from_str(&body)?;

        debug!(
            "Analyze response: label={} confidence={}",
            result.label, result.confidence
        );
        Ok(result)
    }

    async fn analyze_raw(&self, text: &str) -> Result<RawAnalysis, ClientError> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.analyze_url)
            .json(&AnalysisRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let duration = started.elapsed();

        Ok(RawAnalysis {
            status,
            duration,
            body,
        })
    }

    async fn health(&self) -> Result<u16, ClientError> {
        debug!("Probing health endpoint {}", self.health_url);
        let response = self.client.get(&self.health_url).send().await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_endpoint_urls() {
        let service = HttpSentimentService::from_config(
            &HttpConfig::default(),
            &ServiceConfig::default(),
        )
        .unwrap();

        assert_eq!(
            service.analyze_url(),
            "http://api.sentiment-analyzer.local/analyze"
        );
        assert_eq!(
            service.health_url,
            "http://api.sentiment-analyzer.local/health"
        );
    }
}
