//! HTTP client for the remote sentiment-analysis service
//!
//! This crate provides a typed client for the service's analyze and health
//! endpoints, and a session layer that keeps the single-result,
//! most-recent-first-history view a thin front end needs.

pub mod client;
pub mod errors;
pub mod session;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main types for convenience
pub use client::{HttpSentimentService, SentimentService};
pub use errors::ClientError;
pub use session::{AnalyzeSession, SubmitError};
pub use types::{AnalysisRequest, AnalysisResult, HistoryEntry, RawAnalysis, ERROR_LABEL};
