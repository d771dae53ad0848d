//! Request, response and history types for the sentiment service

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Label stored when an analysis attempt fails for any reason
pub const ERROR_LABEL: &str = "Error";

/// Request body of the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Successful response body of the analyze endpoint
///
/// Produced only by the remote service; nothing in this crate computes a
/// label or confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub label: String,
    pub confidence: f64,
}

impl AnalysisResult {
    /// The synthetic record stored when an analysis attempt fails
    pub fn failure() -> Self {
        Self {
            label: ERROR_LABEL.to_string(),
            confidence: 0.0,
        }
    }

    /// Whether the confidence honors the service contract of lying in [0, 1].
    /// A violation is evidence of a faulty response and is never corrected.
    pub fn confidence_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }

    /// Whether this is the synthetic failure record
    pub fn is_failure(&self) -> bool {
        self.label == ERROR_LABEL && self.confidence == 0.0
    }
}

/// One past analysis, recorded client-side on success
///
/// Entries are immutable after creation and live only for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub label: String,
    pub timestamp: String,
}

/// Unparsed view of one analyze probe, as observed on the wire
///
/// Used by validators that must classify malformed responses rather than
/// fail on them.
#[derive(Debug, Clone)]
pub struct RawAnalysis {
    pub status: u16,
    pub duration: Duration,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_text_object() {
        let request = AnalysisRequest {
            text: "I love this".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"text": "I love this"}));
    }

    #[test]
    fn test_result_deserializes() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"label":"positive","confidence":0.93}"#).unwrap();
        assert_eq!(result.label, "positive");
        assert_eq!(result.confidence, 0.93);
        assert!(result.confidence_in_range());
    }

    #[test]
    fn test_failure_record() {
        let failure = AnalysisResult::failure();
        assert_eq!(failure.label, "Error");
        assert_eq!(failure.confidence, 0.0);
        assert!(failure.is_failure());
    }

    #[test]
    fn test_confidence_range_boundaries() {
        let mut result = AnalysisResult {
            label: "neutral".to_string(),
            confidence: 0.0,
        };
        assert!(result.confidence_in_range());

        result.confidence = 1.0;
        assert!(result.confidence_in_range());

        result.confidence = 1.01;
        assert!(!result.confidence_in_range());

        result.confidence = -0.2;
        assert!(!result.confidence_in_range());
    }
}
