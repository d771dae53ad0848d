//! Fixed-format text rendering of a completed run

use crate::metrics::RunSummary;
use crate::thresholds::ThresholdReport;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Everything known about one completed load run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub thresholds: ThresholdReport,
}

impl RunReport {
    /// Whether every threshold held
    pub fn passed(&self) -> bool {
        self.thresholds.passed()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "=== Load Test Report ===")?;
        writeln!(f, "Run ID: {}", self.run_id.hyphenated())?;
        writeln!(
            f,
            "Started:  {}",
            self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;
        writeln!(
            f,
            "Finished: {}",
            self.ended_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;
        writeln!(f, "Duration: {:.3}s", s.wall_clock_ms as f64 / 1000.0)?;

        match s.health_check {
            Some(true) => writeln!(f, "Health check: passed")?,
            Some(false) => writeln!(f, "Health check: FAILED")?,
            None => writeln!(f, "Health check: not run")?,
        }

        writeln!(f, "Total requests: {}", s.total_requests)?;
        writeln!(
            f,
            "HTTP failures: {} ({:.2}%)",
            s.http_failures,
            s.http_failure_rate * 100.0
        )?;
        writeln!(
            f,
            "Validation failures: {} ({:.2}%)",
            s.check_failures,
            s.check_failure_rate * 100.0
        )?;
        writeln!(f, "Throughput: {:.2} req/s", s.requests_per_second)?;

        writeln!(f, "Response times:")?;
        writeln!(
            f,
            "  Min: {}ms  Mean: {:.2}ms  Max: {}ms",
            s.min_ms, s.mean_ms, s.max_ms
        )?;
        writeln!(
            f,
            "  P50: {}ms  P90: {}ms  P95: {}ms  P99: {}ms",
            s.p50_ms, s.p90_ms, s.p95_ms, s.p99_ms
        )?;

        if !s.status_codes.is_empty() {
            writeln!(f, "Status codes:")?;
            for (code, count) in &s.status_codes {
                writeln!(f, "  {}: {}", code, count)?;
            }
        }

        writeln!(f, "Checks:")?;
        for check in &s.checks {
            writeln!(
                f,
                "  {}: {} passed, {} failed",
                check.name, check.passes, check.failures
            )?;
        }

        writeln!(f, "Thresholds:")?;
        for outcome in &self.thresholds.outcomes {
            writeln!(
                f,
                "  [{}] {}: {} (limit {})",
                if outcome.passed { "PASS" } else { "FAIL" },
                outcome.name,
                outcome.observed,
                outcome.limit
            )?;
        }

        write!(
            f,
            "Overall: {}",
            if self.passed() { "PASSED" } else { "FAILED" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::Thresholds;

    fn summary() -> RunSummary {
        RunSummary {
            total_requests: 42,
            http_failures: 2,
            check_failures: 3,
            http_failure_rate: 2.0 / 42.0,
            check_failure_rate: 3.0 / 42.0,
            checks: Vec::new(),
            min_ms: 12,
            mean_ms: 104.5,
            max_ms: 602,
            p50_ms: 90,
            p90_ms: 300,
            p95_ms: 450,
            p99_ms: 600,
            requests_per_second: 4.2,
            wall_clock_ms: 10_000,
            status_codes: vec![(200, 40), (500, 2)],
            health_check: Some(true),
        }
    }

    #[test]
    fn test_render_contains_key_statistics() {
        let summary = summary();
        let thresholds = Thresholds::default().evaluate(&summary);
        let report = RunReport {
            run_id: Uuid::nil(),
            started_at: Utc::now(),
            ended_at: Utc::now(),
            summary,
            thresholds,
        };

        let rendered = report.to_string();
        assert!(rendered.contains("Total requests: 42"));
        assert!(rendered.contains("HTTP failures: 2 (4.76%)"));
        assert!(rendered.contains("P95: 450ms"));
        assert!(rendered.contains("Health check: passed"));
        assert!(rendered.contains("Overall: PASSED"));
    }

    #[test]
    fn test_render_marks_breaches() {
        let mut summary = summary();
        summary.p99_ms = 9000;
        let thresholds = Thresholds::default().evaluate(&summary);
        let report = RunReport {
            run_id: Uuid::nil(),
            started_at: Utc::now(),
            ended_at: Utc::now(),
            summary,
            thresholds,
        };

        let rendered = report.to_string();
        assert!(rendered.contains("[FAIL] http_req_duration p99"));
        assert!(rendered.contains("Overall: FAILED"));
    }
}
