//! Load generator configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_unit_rate, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Load generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Ordered ramp profile; each stage transitions the active virtual-user
    /// count from the previous stage's target to its own over its duration
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,

    /// Lower bound of the per-iteration think-time sleep
    #[serde(
        with = "crate::domains::utils::serde_duration_ms",
        default = "default_think_time_min"
    )]
    pub think_time_min: Duration,

    /// Upper bound (exclusive) of the per-iteration think-time sleep
    #[serde(
        with = "crate::domains::utils::serde_duration_ms",
        default = "default_think_time_max"
    )]
    pub think_time_max: Duration,

    /// Fraction of iterations that emit a diagnostic log line
    #[serde(default = "default_log_sample_rate")]
    pub log_sample_rate: f64,

    /// Pass/fail gate evaluated over the aggregated run statistics
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

/// One stage of the ramp profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage duration
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub duration: Duration,

    /// Virtual-user count to reach by the end of the stage
    pub target: u32,
}

/// Run-level pass/fail thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// p90 request duration limit in milliseconds
    #[serde(default = "default_p90_ms")]
    pub p90_ms: u64,

    /// p95 request duration limit in milliseconds
    #[serde(default = "default_p95_ms")]
    pub p95_ms: u64,

    /// p99 request duration limit in milliseconds
    #[serde(default = "default_p99_ms")]
    pub p99_ms: u64,

    /// Maximum tolerated HTTP failure rate
    #[serde(default = "default_failure_rate")]
    pub http_failure_rate: f64,

    /// Maximum tolerated validation-check failure rate
    #[serde(default = "default_failure_rate")]
    pub check_failure_rate: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            think_time_min: default_think_time_min(),
            think_time_max: default_think_time_max(),
            log_sample_rate: default_log_sample_rate(),
            thresholds: ThresholdsConfig::default(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            p90_ms: default_p90_ms(),
            p95_ms: default_p95_ms(),
            p99_ms: default_p99_ms(),
            http_failure_rate: default_failure_rate(),
            check_failure_rate: default_failure_rate(),
        }
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.stages.is_empty() {
            return Err(self.validation_error("at least one stage must be configured"));
        }

        for (i, stage) in self.stages.iter().enumerate() {
            if stage.duration.is_zero() {
                return Err(self.validation_error(format!("stage {} has zero duration", i)));
            }
        }

        if self.think_time_max < self.think_time_min {
            return Err(self.validation_error(format!(
                "think_time_max ({:?}) must not be below think_time_min ({:?})",
                self.think_time_max, self.think_time_min
            )));
        }

        validate_unit_rate(self.log_sample_rate, "log_sample_rate", self.domain_name())?;
        self.thresholds.validate()?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

impl Validatable for ThresholdsConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.p90_ms, "p90_ms", self.domain_name())?;
        validate_positive(self.p95_ms, "p95_ms", self.domain_name())?;
        validate_positive(self.p99_ms, "p99_ms", self.domain_name())?;
        validate_unit_rate(
            self.http_failure_rate,
            "http_failure_rate",
            self.domain_name(),
        )?;
        validate_unit_rate(
            self.check_failure_rate,
            "check_failure_rate",
            self.domain_name(),
        )?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load.thresholds"
    }
}

// Default value functions

/// The shipped ramp profile: ramp to 10, 50 and 100 users with holds
/// between, a 200-user stress plateau, then a ramp down to zero
fn default_stages() -> Vec<StageConfig> {
    fn stage(secs: u64, target: u32) -> StageConfig {
        StageConfig {
            duration: Duration::from_secs(secs),
            target,
        }
    }

    vec![
        stage(2 * 60, 10),
        stage(5 * 60, 10),
        stage(2 * 60, 50),
        stage(5 * 60, 50),
        stage(2 * 60, 100),
        stage(5 * 60, 100),
        stage(10 * 60, 200),
        stage(5 * 60, 0),
    ]
}

fn default_think_time_min() -> Duration {
    Duration::from_secs(1)
}

fn default_think_time_max() -> Duration {
    Duration::from_secs(3)
}

fn default_log_sample_rate() -> f64 {
    0.01
}

fn default_p90_ms() -> u64 {
    2000
}

fn default_p95_ms() -> u64 {
    3000
}

fn default_p99_ms() -> u64 {
    5000
}

fn default_failure_rate() -> f64 {
    0.1
}
