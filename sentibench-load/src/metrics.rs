//! Commutative metric aggregation across virtual users
//!
//! Workers only ever add to counters or push samples; nothing here depends
//! on the order contributions arrive in, so no cross-worker coordination is
//! needed beyond the atomics and a short-lived lock on the sample vectors.

use crate::checks::CheckOutcome;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Shared metric accumulation for one load run
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    total: AtomicU64,
    http_failures: AtomicU64,
    check_failures: AtomicU64,
    status_pass: AtomicU64,
    latency_pass: AtomicU64,
    fields_pass: AtomicU64,
    confidence_pass: AtomicU64,
    durations_ms: Mutex<Vec<u64>>,
    status_codes: Mutex<HashMap<u16, u64>>,
    health_check: Mutex<Option<bool>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed response and its validation outcome
    pub async fn record_probe(&self, outcome: &CheckOutcome, status: u16, duration: Duration) {
        self.total.fetch_add(1, Ordering::Relaxed);

        if !(200..400).contains(&status) {
            self.http_failures.fetch_add(1, Ordering::Relaxed);
        }
        if !outcome.all_passed() {
            self.check_failures.fetch_add(1, Ordering::Relaxed);
        }

        if outcome.status_ok {
            self.status_pass.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.latency_ok {
            self.latency_pass.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.has_fields {
            self.fields_pass.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.confidence_ok {
            self.confidence_pass.fetch_add(1, Ordering::Relaxed);
        }

        self.durations_ms.lock().await.push(duration.as_millis() as u64);
        *self
            .status_codes
            .lock()
            .await
            .entry(status)
            .or_insert(0) += 1;
    }

    /// Record an attempt that produced no response at all (connect error,
    /// timeout); counts against both failure rate families
    pub async fn record_transport_failure(&self, duration: Duration) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.http_failures.fetch_add(1, Ordering::Relaxed);
        self.check_failures.fetch_add(1, Ordering::Relaxed);
        self.durations_ms.lock().await.push(duration.as_millis() as u64);
    }

    /// Record the setup health probe outcome; informational only, does not
    /// contribute to the failure rates
    pub async fn record_health_check(&self, passed: bool) {
        *self.health_check.lock().await = Some(passed);
    }

    /// Total attempts recorded so far
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Fold the accumulated samples into a run summary
    pub async fn snapshot(&self, wall_clock: Duration) -> RunSummary {
        let mut durations = self.durations_ms.lock().await.clone();
        durations.sort_unstable();

        let total = self.total.load(Ordering::Relaxed);
        let http_failures = self.http_failures.load(Ordering::Relaxed);
        let check_failures = self.check_failures.load(Ordering::Relaxed);

        let rate = |count: u64| {
            if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            }
        };

        let check_stat = |name: &str, passes: &AtomicU64| {
            let passes = passes.load(Ordering::Relaxed);
            CheckStat {
                name: name.to_string(),
                passes,
                failures: total - passes,
            }
        };

        let mut summary = RunSummary {
            total_requests: total,
            http_failures,
            check_failures,
            http_failure_rate: rate(http_failures),
            check_failure_rate: rate(check_failures),
            checks: vec![
                check_stat("status is 200", &self.status_pass),
                check_stat("response time < 5s", &self.latency_pass),
                check_stat("has label", &self.fields_pass),
                check_stat("confidence is valid", &self.confidence_pass),
            ],
            min_ms: 0,
            mean_ms: 0.0,
            max_ms: 0,
            p50_ms: 0,
            p90_ms: 0,
            p95_ms: 0,
            p99_ms: 0,
            requests_per_second: 0.0,
            wall_clock_ms: wall_clock.as_millis() as u64,
            status_codes: Vec::new(),
            health_check: *self.health_check.lock().await,
        };

        if !durations.is_empty() {
            summary.min_ms = durations[0];
            summary.max_ms = durations[durations.len() - 1];
            summary.mean_ms =
                durations.iter().sum::<u64>() as f64 / durations.len() as f64;
            summary.p50_ms = percentile(&durations, 50);
            summary.p90_ms = percentile(&durations, 90);
            summary.p95_ms = percentile(&durations, 95);
            summary.p99_ms = percentile(&durations, 99);
        }

        if !wall_clock.is_zero() {
            summary.requests_per_second = total as f64 / wall_clock.as_secs_f64();
        }

        let mut status_codes: Vec<(u16, u64)> = self
            .status_codes
            .lock()
            .await
            .iter()
            .map(|(&code, &count)| (code, count))
            .collect();
        status_codes.sort_unstable();
        summary.status_codes = status_codes;

        summary
    }
}

/// Nearest-rank percentile over an ascending-sorted sample vector
fn percentile(sorted: &[u64], p: usize) -> u64 {
    let index = (sorted.len() * p / 100).min(sorted.len() - 1);
    sorted[index]
}

/// Pass/fail tally for one named validation check
#[derive(Debug, Clone, Serialize)]
pub struct CheckStat {
    pub name: String,
    pub passes: u64,
    pub failures: u64,
}

/// Aggregated statistics for one completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_requests: u64,
    pub http_failures: u64,
    pub check_failures: u64,
    pub http_failure_rate: f64,
    pub check_failure_rate: f64,
    pub checks: Vec<CheckStat>,
    pub min_ms: u64,
    pub mean_ms: f64,
    pub max_ms: u64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub requests_per_second: f64,
    pub wall_clock_ms: u64,
    pub status_codes: Vec<(u16, u64)>,
    /// Outcome of the setup health probe, if it ran
    pub health_check: Option<bool>,
}
