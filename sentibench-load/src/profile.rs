//! Stage profile: the declarative ramp of virtual-user targets

use sentibench_config::StageConfig;
use std::time::Duration;

/// One stage of the ramp profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStage {
    /// Stage duration
    pub duration: Duration,
    /// Virtual-user count to reach by the end of the stage
    pub target: u32,
}

impl From<StageConfig> for LoadStage {
    fn from(config: StageConfig) -> Self {
        Self {
            duration: config.duration,
            target: config.target,
        }
    }
}

/// An ordered sequence of stages, consumed once per run
///
/// The profile is the sole authority on how many virtual users are active
/// at any wall-clock offset; it never inspects response outcomes.
#[derive(Debug, Clone)]
pub struct StageProfile {
    stages: Vec<LoadStage>,
}

impl StageProfile {
    pub fn new(stages: Vec<LoadStage>) -> Self {
        Self { stages }
    }

    pub fn from_config(stages: &[StageConfig]) -> Self {
        Self::new(stages.iter().copied().map(LoadStage::from).collect())
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Nominal run length: the sum of all stage durations
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Highest target named by any stage
    pub fn max_target(&self) -> u32 {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    /// Desired virtual-user count at the given offset into the run.
    ///
    /// Within each stage the count is interpolated linearly from the
    /// previous stage's target (0 before the first stage) to the stage
    /// target; equal targets hold flat. Offsets past the end of the
    /// profile yield `None`: the run is over.
    pub fn target_at(&self, offset: Duration) -> Option<u32> {
        let mut stage_start = Duration::ZERO;
        let mut previous_target = 0u32;

        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if offset < stage_end {
                let elapsed = (offset - stage_start).as_secs_f64();
                let fraction = elapsed / stage.duration.as_secs_f64();
                let from = previous_target as f64;
                let to = stage.target as f64;
                return Some((from + (to - from) * fraction).round() as u32);
            }
            stage_start = stage_end;
            previous_target = stage.target;
        }

        None
    }
}
