//! Run-level pass/fail gate over aggregated statistics

use crate::metrics::RunSummary;
use sentibench_config::ThresholdsConfig;
use serde::Serialize;

/// Threshold limits evaluated once at run end
#[derive(Debug, Clone)]
pub struct Thresholds {
    pub p90_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub http_failure_rate: f64,
    pub check_failure_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&ThresholdsConfig::default())
    }
}

impl From<&ThresholdsConfig> for Thresholds {
    fn from(config: &ThresholdsConfig) -> Self {
        Self {
            p90_ms: config.p90_ms,
            p95_ms: config.p95_ms,
            p99_ms: config.p99_ms,
            http_failure_rate: config.http_failure_rate,
            check_failure_rate: config.check_failure_rate,
        }
    }
}

impl Thresholds {
    /// Evaluate every threshold family against the summary.
    ///
    /// Pure aggregate evaluation: any breach fails the run, nothing is
    /// remediated.
    pub fn evaluate(&self, summary: &RunSummary) -> ThresholdReport {
        let duration_outcome = |name: &str, observed: u64, limit: u64| ThresholdOutcome {
            name: name.to_string(),
            observed: format!("{}ms", observed),
            limit: format!("< {}ms", limit),
            passed: observed < limit,
        };
        let rate_outcome = |name: &str, observed: f64, limit: f64| ThresholdOutcome {
            name: name.to_string(),
            observed: format!("{:.2}%", observed * 100.0),
            limit: format!("< {:.0}%", limit * 100.0),
            passed: observed < limit,
        };

        ThresholdReport {
            outcomes: vec![
                duration_outcome("http_req_duration p90", summary.p90_ms, self.p90_ms),
                duration_outcome("http_req_duration p95", summary.p95_ms, self.p95_ms),
                duration_outcome("http_req_duration p99", summary.p99_ms, self.p99_ms),
                rate_outcome(
                    "http_req_failed rate",
                    summary.http_failure_rate,
                    self.http_failure_rate,
                ),
                rate_outcome(
                    "errors rate",
                    summary.check_failure_rate,
                    self.check_failure_rate,
                ),
            ],
        }
    }
}

/// One evaluated threshold
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdOutcome {
    pub name: String,
    pub observed: String,
    pub limit: String,
    pub passed: bool,
}

/// All evaluated thresholds for one run
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdReport {
    pub outcomes: Vec<ThresholdOutcome>,
}

impl ThresholdReport {
    /// Whether every threshold held
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Number of breached thresholds
    pub fn breached(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_summary() -> RunSummary {
        RunSummary {
            total_requests: 1000,
            http_failures: 0,
            check_failures: 0,
            http_failure_rate: 0.0,
            check_failure_rate: 0.0,
            checks: Vec::new(),
            min_ms: 10,
            mean_ms: 120.0,
            max_ms: 900,
            p50_ms: 100,
            p90_ms: 400,
            p95_ms: 600,
            p99_ms: 900,
            requests_per_second: 50.0,
            wall_clock_ms: 20_000,
            status_codes: vec![(200, 1000)],
            health_check: Some(true),
        }
    }

    #[test]
    fn test_clean_run_passes_all_families() {
        let report = Thresholds::default().evaluate(&clean_summary());
        assert!(report.passed());
        assert_eq!(report.breached(), 0);
        assert_eq!(report.outcomes.len(), 5);
    }

    #[test]
    fn test_slow_percentile_fails_only_its_outcome() {
        let mut summary = clean_summary();
        summary.p95_ms = 3500;

        let report = Thresholds::default().evaluate(&summary);
        assert!(!report.passed());
        assert_eq!(report.breached(), 1);
        let p95 = &report.outcomes[1];
        assert_eq!(p95.name, "http_req_duration p95");
        assert!(!p95.passed);
    }

    #[test]
    fn test_limits_are_strict() {
        let mut summary = clean_summary();
        // Exactly at the limit is a breach: the requirement is strictly-below
        summary.p90_ms = 2000;
        summary.http_failure_rate = 0.1;

        let report = Thresholds::default().evaluate(&summary);
        assert_eq!(report.breached(), 2);
    }

    #[test]
    fn test_failure_rates_gate_independently() {
        let mut summary = clean_summary();
        summary.check_failure_rate = 0.25;

        let report = Thresholds::default().evaluate(&summary);
        assert!(!report.passed());
        let errors = report.outcomes.last().unwrap();
        assert_eq!(errors.name, "errors rate");
        assert!(!errors.passed);

        // HTTP failure family remains green
        assert!(report.outcomes[3].passed);
    }
}
