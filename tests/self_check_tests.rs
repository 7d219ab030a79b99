use featurecalc::{
    Dispatcher, Feature, FeatureSet,
    self_check::{check_arithmetic, check_history_gate, run_self_check, run_strict_self_check},
};

#[test]
fn test_agile_self_check_passes() {
    let dispatcher = Dispatcher::new(&FeatureSet::agile());
    let report = run_self_check(&dispatcher);
    assert_eq!(report.passed, 5);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);
    assert!(run_strict_self_check(&dispatcher).is_ok());
}

#[test]
fn test_waterfall_skips_undelivered_operations() {
    let dispatcher = Dispatcher::new(&FeatureSet::waterfall());
    let report = check_arithmetic(&dispatcher);
    assert_eq!(report.passed, 2);
    assert_eq!(report.skipped, 2);
    assert!(!report.has_failures());
}

#[test]
fn test_history_gate_with_history_on() {
    let dispatcher = Dispatcher::new(&FeatureSet::agile().with(Feature::History, true));
    let report = check_history_gate(&dispatcher);
    assert_eq!(report.passed, 1);
}

#[test]
fn test_broken_operation_is_reported() {
    let dispatcher = Dispatcher::builder(FeatureSet::agile())
        .register("multiply", |a, b| a + b)
        .build();
    let err = run_strict_self_check(&dispatcher).unwrap_err();
    assert_eq!(err.report.failed, 1);
    assert!(err.report.failures[0].starts_with("multiply(3, 4) returned 7"));
    assert_eq!(err.to_string(), "1 self check(s) failed");
}

#[test]
fn test_injected_history_passes_history_gate() {
    let dispatcher = Dispatcher::builder(FeatureSet::agile())
        .history(featurecalc::MemoryHistory::new())
        .build();
    assert!(dispatcher.features().is_enabled(Feature::History));
    let report = check_history_gate(&dispatcher);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 0);
}
