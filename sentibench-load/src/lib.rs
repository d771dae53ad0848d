//! Staged load generator for the sentiment-analysis service
//!
//! This crate drives synthetic concurrent traffic through a predefined ramp
//! profile: a scheduler adjusts the number of active virtual users on a
//! timer, each virtual user repeatedly probes the analyze endpoint with a
//! random corpus text, validates the response shape and latency, and folds
//! the outcome into shared metrics. At run end the aggregated statistics
//! are gated by latency-percentile and failure-rate thresholds.

pub mod checks;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod runner;
pub mod thresholds;

mod worker;

// Re-export main types
pub use checks::CheckOutcome;
pub use error::LoadError;
pub use metrics::{MetricsRegistry, RunSummary};
pub use profile::{LoadStage, StageProfile};
pub use report::RunReport;
pub use runner::{LoadRunner, RunOptions};
pub use thresholds::{ThresholdReport, Thresholds};
