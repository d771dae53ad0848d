//! Testing utilities: mock and stub implementations of [`SentimentService`]
//!
//! Enabled for this crate's own tests and for downstream crates via the
//! `testing` feature.

use crate::client::SentimentService;
use crate::errors::ClientError;
use crate::types::{AnalysisResult, RawAnalysis};
use mockall::mock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

mock! {
    pub Sentiment {}

    #[async_trait::async_trait]
    impl SentimentService for Sentiment {
        async fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError>;
        async fn analyze_raw(&self, text: &str) -> Result<RawAnalysis, ClientError>;
        async fn health(&self) -> Result<u16, ClientError>;
    }
}

/// Canned-response service for concurrency tests.
///
/// Unlike the mockall mock, this stub is freely shareable across many
/// worker tasks and keeps call counters instead of expectations.
#[derive(Debug)]
pub struct StubSentimentService {
    /// Status code returned by `analyze_raw`
    pub status: u16,
    /// Body returned by `analyze_raw`
    pub body: String,
    /// Simulated service latency
    pub latency: Duration,
    /// Status code returned by `health`
    pub health_status: u16,
    analyze_calls: AtomicU64,
    health_calls: AtomicU64,
    seen_texts: Mutex<Vec<String>>,
}

impl StubSentimentService {
    /// A stub that behaves like a healthy service
    pub fn healthy() -> Self {
        Self {
            status: 200,
            body: r#"{"label":"positive","confidence":0.95}"#.to_string(),
            latency: Duration::ZERO,
            health_status: 200,
            analyze_calls: AtomicU64::new(0),
            health_calls: AtomicU64::new(0),
            seen_texts: Mutex::new(Vec::new()),
        }
    }

    /// A stub whose responses fail validation with the given status and body
    pub fn faulty(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            ..Self::healthy()
        }
    }

    /// Number of analyze probes served so far
    pub fn analyze_calls(&self) -> u64 {
        self.analyze_calls.load(Ordering::Relaxed)
    }

    /// Number of health probes served so far
    pub fn health_calls(&self) -> u64 {
        self.health_calls.load(Ordering::Relaxed)
    }

    /// Every text received by `analyze_raw`, in arrival order
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen_texts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl SentimentService for StubSentimentService {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let raw = self.analyze_raw(text).await?;
        if !(200..300).contains(&raw.status) {
            return Err(ClientError::UnexpectedStatus(raw.status));
        }
        Ok(serde_json::from_str(&raw.body)?)
    }

    async fn analyze_raw(&self, text: &str) -> Result<RawAnalysis, ClientError> {
        self.analyze_calls.fetch_add(1, Ordering::Relaxed);
        self.seen_texts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(RawAnalysis {
            status: self.status,
            duration: self.latency,
            body: self.body.clone(),
        })
    }

    async fn health(&self) -> Result<u16, ClientError> {
        self.health_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.health_status)
    }
}
