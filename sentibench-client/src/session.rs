//! Analyze session: single-result, most-recent-first-history orchestration
//!
//! This is the front-end flow behind a submit control: validate the input,
//! keep one request in flight at a time, collapse every failure into a
//! single synthetic error record, and remember successful analyses.

use crate::client::SentimentService;
use crate::types::{AnalysisResult, HistoryEntry};
use tracing::{debug, warn};

/// Pre-flight rejections of a submission
///
/// These are the only errors `submit` surfaces; a failed analysis is a
/// stored outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Input was empty or whitespace-only; no request was sent
    #[error("text is empty after trimming")]
    EmptyText,

    /// A previous submission has not completed yet
    #[error("a request is already in flight")]
    RequestInFlight,
}

/// Session state for the analyze flow
pub struct AnalyzeSession<S: SentimentService> {
    service: S,
    result: Option<AnalysisResult>,
    history: Vec<HistoryEntry>,
    in_flight: bool,
}

impl<S: SentimentService> AnalyzeSession<S> {
    /// Create a session over a service client
    pub fn new(service: S) -> Self {
        Self {
            service,
            result: None,
            history: Vec::new(),
            in_flight: false,
        }
    }

    /// Submit one text for analysis.
    ///
    /// Empty or whitespace-only input is rejected before any network call.
    /// On success the result is stored and a history entry is prepended; on
    /// any failure (transport error, non-success status, malformed body,
    /// out-of-range confidence) the stored result becomes the synthetic
    /// `{label: "Error", confidence: 0}` record and history is untouched.
    /// Exactly one attempt is made per call.
    pub async fn submit(&mut self, text: &str) -> Result<AnalysisResult, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyText);
        }
        if self.in_flight {
            return Err(SubmitError::RequestInFlight);
        }

        // The guard stays set across the await; dropping a submit future
        // mid-request leaves it set, matching a flow with no cancellation.
        self.in_flight = true;
        self.result = None;
        let outcome = self.service.analyze(text).await;
        self.in_flight = false;

        let stored = match outcome {
            Ok(result) if result.confidence_in_range() => {
                debug!("Analysis succeeded with label {}", result.label);
                self.history.insert(
                    0,
                    HistoryEntry {
                        text: text.to_string(),
                        label: result.label.clone(),
                        timestamp: current_timestamp(),
                    },
                );
                result
            }
            Ok(result) => {
                warn!(
                    "Analysis response violated the confidence contract: {}",
                    result.confidence
                );
                AnalysisResult::failure()
            }
            Err(err) => {
                warn!("Analysis attempt failed: {}", err);
                AnalysisResult::failure()
            }
        };

        self.result = Some(stored.clone());
        Ok(stored)
    }

    /// The outcome of the most recent completed submission, if any
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Past successful analyses, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Whether a submission is currently outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Drop all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
