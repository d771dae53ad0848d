//! Run lifecycle: setup, stage scheduling, teardown, aggregation

use crate::error::LoadError;
use crate::metrics::MetricsRegistry;
use crate::profile::StageProfile;
use crate::report::RunReport;
use crate::thresholds::Thresholds;
use crate::worker::{WorkerContext, WorkerPool};
use sentibench_client::{HttpSentimentService, SentimentService};
use sentibench_config::{LoadConfig, SentibenchConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tunables for one run, beyond the stage profile itself
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub think_time_min: Duration,
    pub think_time_max: Duration,
    pub log_sample_rate: f64,
    pub thresholds: Thresholds,
    /// How often the scheduler re-evaluates the desired user count
    pub tick: Duration,
    /// Human-readable target shown in the setup banner
    pub target_label: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&LoadConfig::default())
    }
}

impl From<&LoadConfig> for RunOptions {
    fn from(config: &LoadConfig) -> Self {
        Self {
            think_time_min: config.think_time_min,
            think_time_max: config.think_time_max,
            log_sample_rate: config.log_sample_rate,
            thresholds: Thresholds::from(&config.thresholds),
            tick: Duration::from_secs(1),
            target_label: None,
        }
    }
}

impl RunOptions {
    /// Override the scheduler tick (used by compressed-profile tests)
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the target label shown in the setup banner
    pub fn with_target_label(mut self, label: impl Into<String>) -> Self {
        self.target_label = Some(label.into());
        self
    }
}

/// Drives one load run end to end
pub struct LoadRunner {
    service: Arc<dyn SentimentService>,
    profile: StageProfile,
    options: RunOptions,
}

impl LoadRunner {
    /// Create a runner over an existing service client
    pub fn new(
        service: Arc<dyn SentimentService>,
        profile: StageProfile,
        options: RunOptions,
    ) -> Result<Self, LoadError> {
        if profile.is_empty() {
            return Err(LoadError::EmptyProfile);
        }

        Ok(Self {
            service,
            profile,
            options,
        })
    }

    /// Create a runner from configuration, building the HTTP client
    pub fn from_config(config: &SentibenchConfig) -> Result<Self, LoadError> {
        let service = HttpSentimentService::from_config(&config.http, &config.service)?;
        let options = RunOptions::from(&config.load)
            .with_target_label(config.service.analyze_url());

        Self::new(
            Arc::new(service),
            StageProfile::from_config(&config.load.stages),
            options,
        )
    }

    /// Execute the whole profile and return the aggregated report.
    ///
    /// Individual probe failures never abort the run; the only terminal
    /// condition is the profile running out.
    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = chrono::Utc::now();
        let metrics = Arc::new(MetricsRegistry::new());

        self.setup(&metrics).await;

        let ctx = Arc::new(WorkerContext {
            service: self.service.clone(),
            metrics: metrics.clone(),
            think_time_min: self.options.think_time_min,
            think_time_max: self.options.think_time_max,
            log_sample_rate: self.options.log_sample_rate,
        });

        let clock = tokio::time::Instant::now();
        let mut interval = tokio::time::interval(self.options.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pool = WorkerPool::new(ctx);
        loop {
            interval.tick().await;
            match self.profile.target_at(clock.elapsed()) {
                Some(target) => pool.scale_to(target),
                None => break,
            }
        }

        debug!(
            "Profile exhausted with {} virtual users still active",
            pool.active_count()
        );
        pool.shutdown().await;

        self.teardown();

        let wall_clock = clock.elapsed();
        let summary = metrics.snapshot(wall_clock).await;
        let thresholds = self.options.thresholds.evaluate(&summary);

        RunReport {
            run_id,
            started_at,
            ended_at: chrono::Utc::now(),
            summary,
            thresholds,
        }
    }

    /// Runs once before any stage: banners and the health probe. A failed
    /// health check is recorded and logged, never fatal.
    async fn setup(&self, metrics: &MetricsRegistry) {
        info!("Starting performance test for the sentiment service");
        if let Some(target) = &self.options.target_label {
            info!("Target: {}", target);
        }
        info!(
            "Profile: {} stages, {}s nominal run length",
            self.profile.stage_count(),
            self.profile.total_duration().as_secs()
        );

        match self.service.health().await {
            Ok(200) => {
                debug!("Health check passed");
                metrics.record_health_check(true).await;
            }
            Ok(status) => {
                warn!("Health check returned status {}", status);
                metrics.record_health_check(false).await;
            }
            Err(err) => {
                warn!("Health check failed: {}", err);
                metrics.record_health_check(false).await;
            }
        }
    }

    /// Runs once after the final stage; reporting is handled by the caller
    fn teardown(&self) {
        info!("Performance test completed");
        info!("Aggregated metrics follow in the run report");
    }
}
