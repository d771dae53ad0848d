//! Per-response validation checks
//!
//! Four independent booleans per probe; a response that fails JSON decoding
//! fails the body-shape checks without raising.

use sentibench_client::RawAnalysis;
use std::time::Duration;

/// Upper bound on acceptable request duration
pub const LATENCY_LIMIT: Duration = Duration::from_millis(5000);

/// Outcome of the four validation checks for one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    /// HTTP status equals 200
    pub status_ok: bool,
    /// Observed request duration stayed under the latency limit
    pub latency_ok: bool,
    /// Body decoded as JSON and carries both `label` and `confidence`
    pub has_fields: bool,
    /// `confidence` is a number in [0, 1]
    pub confidence_ok: bool,
}

impl CheckOutcome {
    /// Whether every check passed
    pub fn all_passed(&self) -> bool {
        self.status_ok && self.latency_ok && self.has_fields && self.confidence_ok
    }

    /// An outcome with every check failed, used for transport failures
    /// where no response was observed at all
    pub fn all_failed() -> Self {
        Self {
            status_ok: false,
            latency_ok: false,
            has_fields: false,
            confidence_ok: false,
        }
    }
}

/// Evaluate the validation checks against one observed response
pub fn evaluate(raw: &RawAnalysis) -> CheckOutcome {
    let status_ok = raw.status == 200;
    let latency_ok = raw.duration < LATENCY_LIMIT;

    let (has_fields, confidence_ok) = match serde_json::from_str::<serde_json::Value>(&raw.body) {
        Ok(body) => {
            let has_fields = body.get("label").is_some() && body.get("confidence").is_some();
            let confidence_ok = body
                .get("confidence")
                .and_then(|c| c.as_f64())
                .map(|c| (0.0..=1.0).contains(&c))
                .unwrap_or(false);
            (has_fields, confidence_ok)
        }
        Err(_) => (false, false),
    };

    CheckOutcome {
        status_ok,
        latency_ok,
        has_fields,
        confidence_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, millis: u64, body: &str) -> RawAnalysis {
        RawAnalysis {
            status,
            duration: Duration::from_millis(millis),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_well_formed_response_passes_all_checks() {
        let outcome = evaluate(&raw(200, 120, r#"{"label":"positive","confidence":0.87}"#));
        assert!(outcome.status_ok);
        assert!(outcome.latency_ok);
        assert!(outcome.has_fields);
        assert!(outcome.confidence_ok);
        assert!(outcome.all_passed());
    }

    #[test]
    fn test_non_200_status_fails_only_status_check() {
        let outcome = evaluate(&raw(503, 120, r#"{"label":"positive","confidence":0.87}"#));
        assert!(!outcome.status_ok);
        assert!(outcome.latency_ok);
        assert!(outcome.has_fields);
        assert!(outcome.confidence_ok);
        assert!(!outcome.all_passed());
    }

    #[test]
    fn test_slow_response_fails_latency_check() {
        let outcome = evaluate(&raw(200, 5000, r#"{"label":"neutral","confidence":0.5}"#));
        assert!(!outcome.latency_ok);
        assert!(!outcome.all_passed());

        let outcome = evaluate(&raw(200, 4999, r#"{"label":"neutral","confidence":0.5}"#));
        assert!(outcome.latency_ok);
    }

    #[test]
    fn test_missing_fields_fail_body_checks() {
        let outcome = evaluate(&raw(200, 50, r#"{"label":"positive"}"#));
        assert!(!outcome.has_fields);
        assert!(!outcome.confidence_ok);

        let outcome = evaluate(&raw(200, 50, r#"{"confidence":0.4}"#));
        assert!(!outcome.has_fields);
        assert!(outcome.confidence_ok);
    }

    #[test]
    fn test_out_of_range_confidence_fails_range_check() {
        let outcome = evaluate(&raw(200, 50, r#"{"label":"positive","confidence":1.3}"#));
        assert!(outcome.has_fields);
        assert!(!outcome.confidence_ok);
        assert!(!outcome.all_passed());

        let outcome = evaluate(&raw(200, 50, r#"{"label":"negative","confidence":-0.1}"#));
        assert!(!outcome.confidence_ok);
    }

    #[test]
    fn test_unparseable_body_fails_without_raising() {
        let outcome = evaluate(&raw(200, 50, "<html>gateway timeout</html>"));
        assert!(outcome.status_ok);
        assert!(outcome.latency_ok);
        assert!(!outcome.has_fields);
        assert!(!outcome.confidence_ok);
    }

    #[test]
    fn test_non_numeric_confidence_fails_range_check() {
        let outcome = evaluate(&raw(200, 50, r#"{"label":"ok","confidence":"high"}"#));
        assert!(outcome.has_fields);
        assert!(!outcome.confidence_ok);
    }
}
