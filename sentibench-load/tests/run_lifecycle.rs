//! End-to-end runs against a stubbed service with a compressed profile

use sentibench_client::testing::StubSentimentService;
use sentibench_load::{LoadRunner, LoadStage, RunOptions, StageProfile, Thresholds};
use std::sync::Arc;
use std::time::Duration;

fn stage(millis: u64, target: u32) -> LoadStage {
    LoadStage {
        duration: Duration::from_millis(millis),
        target,
    }
}

fn compressed_profile() -> StageProfile {
    StageProfile::new(vec![stage(150, 4), stage(150, 4), stage(150, 0)])
}

fn fast_options() -> RunOptions {
    RunOptions {
        think_time_min: Duration::from_millis(1),
        think_time_max: Duration::from_millis(2),
        log_sample_rate: 0.0,
        thresholds: Thresholds::default(),
        tick: Duration::from_millis(20),
        target_label: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn healthy_run_passes_all_thresholds() {
    let service = Arc::new(StubSentimentService::healthy());
    let runner = LoadRunner::new(service.clone(), compressed_profile(), fast_options()).unwrap();

    let report = runner.run().await;

    assert!(report.summary.total_requests > 0);
    assert_eq!(report.summary.http_failures, 0);
    assert_eq!(report.summary.check_failures, 0);
    assert_eq!(report.summary.health_check, Some(true));
    assert!(report.passed(), "report: {}", report);

    // The setup hook probes health exactly once
    assert_eq!(service.health_calls(), 1);
    assert_eq!(service.analyze_calls(), report.summary.total_requests);

    // Every iteration sent one of the fixed corpus texts
    let seen = service.seen_texts();
    assert!(!seen.is_empty());
    assert!(seen
        .iter()
        .all(|t| sentibench_load::corpus::SAMPLE_TEXTS.contains(&t.as_str())));
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_service_breaches_thresholds_without_aborting() {
    let service = Arc::new(StubSentimentService::faulty(
        500,
        "<html>internal error</html>",
    ));
    let runner = LoadRunner::new(service, compressed_profile(), fast_options()).unwrap();

    let report = runner.run().await;

    // Every iteration failed, yet the run completed and aggregated
    assert!(report.summary.total_requests > 0);
    assert_eq!(report.summary.http_failure_rate, 1.0);
    assert_eq!(report.summary.check_failure_rate, 1.0);
    assert!(!report.passed());
}

#[tokio::test(flavor = "multi_thread")]
async fn unhealthy_setup_probe_does_not_abort_the_run() {
    let mut service = StubSentimentService::healthy();
    service.health_status = 500;
    let service = Arc::new(service);

    let runner = LoadRunner::new(service.clone(), compressed_profile(), fast_options()).unwrap();
    let report = runner.run().await;

    assert_eq!(report.summary.health_check, Some(false));
    // Stages still executed
    assert!(service.analyze_calls() > 0);
    // The failed health probe does not count against the failure rates
    assert_eq!(report.summary.check_failure_rate, 0.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn contract_violations_fail_only_the_confidence_check() {
    let service = Arc::new(StubSentimentService::faulty(
        200,
        r#"{"label":"positive","confidence":1.8}"#,
    ));
    let runner = LoadRunner::new(service, compressed_profile(), fast_options()).unwrap();

    let report = runner.run().await;

    assert!(report.summary.total_requests > 0);
    // HTTP-level all good, validation-level all bad
    assert_eq!(report.summary.http_failure_rate, 0.0);
    assert_eq!(report.summary.check_failure_rate, 1.0);

    let confidence_check = report
        .summary
        .checks
        .iter()
        .find(|c| c.name == "confidence is valid")
        .unwrap();
    assert_eq!(confidence_check.passes, 0);

    let status_check = report
        .summary
        .checks
        .iter()
        .find(|c| c.name == "status is 200")
        .unwrap();
    assert_eq!(status_check.failures, 0);
}

#[test]
fn empty_profile_is_rejected() {
    let service = Arc::new(StubSentimentService::healthy());
    let result = LoadRunner::new(service, StageProfile::new(Vec::new()), fast_options());
    assert!(matches!(
        result,
        Err(sentibench_load::LoadError::EmptyProfile)
    ));
}
