//! Virtual users and the pool the scheduler scales
//!
//! Each virtual user is an isolated sequential loop: pick a corpus text,
//! probe the analyze endpoint, validate, record, think-time sleep, repeat.
//! Workers share nothing but the service handle and the metrics registry.

use crate::checks;
use crate::corpus;
use crate::metrics::MetricsRegistry;
use sentibench_client::SentimentService;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shared state handed to every virtual user
pub(crate) struct WorkerContext {
    pub service: Arc<dyn SentimentService>,
    pub metrics: Arc<MetricsRegistry>,
    pub think_time_min: Duration,
    pub think_time_max: Duration,
    pub log_sample_rate: f64,
}

/// One virtual user loop; runs until its stop flag is raised
pub(crate) async fn run_worker(
    id: u32,
    ctx: Arc<WorkerContext>,
    mut stop: watch::Receiver<bool>,
) {
    let mut rng = fastrand::Rng::new();
    debug!("Virtual user {} started", id);

    while !*stop.borrow() {
        run_iteration(&ctx, &mut rng).await;

        // Think time models human pacing and keeps workers from bursting
        // in lockstep; a stop raised during the sleep is observed early.
        let think = think_time(&ctx, &mut rng);
        tokio::select! {
            _ = tokio::time::sleep(think) => {}
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Virtual user {} stopped", id);
}

/// One probe: request, validate, record; never fails the run
async fn run_iteration(ctx: &WorkerContext, rng: &mut fastrand::Rng) {
    let text = corpus::sample(rng);
    let started = Instant::now();

    match ctx.service.analyze_raw(text).await {
        Ok(raw) => {
            let outcome = checks::evaluate(&raw);
            ctx.metrics
                .record_probe(&outcome, raw.status, raw.duration)
                .await;

            // Sampled diagnostics keep some visibility without flooding the
            // log at high concurrency
            if rng.f64() < ctx.log_sample_rate {
                info!(
                    "Response: {}, Duration: {}ms",
                    raw.status,
                    raw.duration.as_millis()
                );
                if raw.status == 200 {
                    info!("Body: {}", raw.body);
                }
            }
        }
        Err(err) => {
            warn!("Probe produced no response: {}", err);
            ctx.metrics.record_transport_failure(started.elapsed()).await;
        }
    }
}

fn think_time(ctx: &WorkerContext, rng: &mut fastrand::Rng) -> Duration {
    let min = ctx.think_time_min.as_millis() as u64;
    let max = ctx.think_time_max.as_millis() as u64;
    if max > min {
        Duration::from_millis(rng.u64(min..max))
    } else {
        ctx.think_time_min
    }
}

/// Handle on one spawned virtual user
struct WorkerHandle {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// The set of live virtual users, scaled by the stage scheduler
pub(crate) struct WorkerPool {
    ctx: Arc<WorkerContext>,
    active: Vec<WorkerHandle>,
    retired: Vec<WorkerHandle>,
    next_id: u32,
}

impl WorkerPool {
    pub(crate) fn new(ctx: Arc<WorkerContext>) -> Self {
        Self {
            ctx,
            active: Vec::new(),
            retired: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Spawn or stop workers until the active count matches the target.
    /// Stops are most-recently-started first, and a stopping worker still
    /// finishes its current iteration.
    pub(crate) fn scale_to(&mut self, target: u32) {
        let target = target as usize;
        if self.active.len() != target {
            debug!(
                "Scaling virtual users: {} -> {}",
                self.active.len(),
                target
            );
        }

        while self.active.len() < target {
            let (stop_tx, stop_rx) = watch::channel(false);
            let handle = tokio::spawn(run_worker(self.next_id, self.ctx.clone(), stop_rx));
            self.next_id += 1;
            self.active.push(WorkerHandle {
                stop: stop_tx,
                handle,
            });
        }

        while self.active.len() > target {
            if let Some(worker) = self.active.pop() {
                let _ = worker.stop.send(true);
                self.retired.push(worker);
            }
        }
    }

    /// Stop everything and wait for all workers, retired ones included
    pub(crate) async fn shutdown(mut self) {
        for worker in &self.active {
            let _ = worker.stop.send(true);
        }

        for worker in self.active.drain(..).chain(self.retired.drain(..)) {
            if let Err(err) = worker.handle.await {
                warn!("Virtual user task failed to join: {}", err);
            }
        }
    }
}
