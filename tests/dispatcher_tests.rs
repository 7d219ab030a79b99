use featurecalc::{
    CalcError, DIVISION_SENTINEL, Dispatcher, Feature, FeatureSet, MemoryHistory, Operation,
};

fn agile() -> Dispatcher {
    Dispatcher::new(&FeatureSet::agile())
}

#[test]
fn test_dispatch_basic_arithmetic() {
    let dispatcher = agile();
    assert!((dispatcher.dispatch("add", 2.0, 3.0).unwrap() - 5.0).abs() < 1e-9);
    assert_eq!(dispatcher.dispatch("subtract", 7.0, 4.0).unwrap(), 3.0);
    assert_eq!(dispatcher.dispatch("multiply", 3.0, 4.0).unwrap(), 12.0);
    assert_eq!(dispatcher.dispatch("divide", 9.0, 3.0).unwrap(), 3.0);
}

#[test]
fn test_divide_by_zero_returns_sentinel() {
    let dispatcher = agile();
    for a in [10.0, -10.0, 0.0, f64::MAX, -1e-300] {
        assert_eq!(dispatcher.dispatch("divide", a, 0.0).unwrap(), f64::INFINITY);
    }
    assert_eq!(dispatcher.dispatch("divide", 1.0, -0.0).unwrap(), DIVISION_SENTINEL);
}

#[test]
fn test_unknown_operation_is_unsupported() {
    let dispatcher = agile();
    for op in ["power", "", "Add", "ADD", " add", "history"] {
        assert_eq!(
            dispatcher.dispatch(op, 1.0, 2.0),
            Err(CalcError::UnsupportedOperation(op.to_string()))
        );
    }
}

#[test]
fn test_disabled_operation_is_unsupported() {
    let dispatcher = Dispatcher::new(&FeatureSet::waterfall());
    assert_eq!(dispatcher.dispatch("add", 5.0, 3.0), Ok(8.0));
    assert_eq!(dispatcher.dispatch("subtract", 5.0, 3.0), Ok(2.0));
    let err = dispatcher.dispatch("multiply", 5.0, 3.0).unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(
        err.to_string(),
        "Feature 'multiply' not available yet (toggle off or not built)."
    );
    assert!(!dispatcher.supports("divide"));
}

#[test]
fn test_operations_listing_is_sorted() {
    let dispatcher = agile();
    assert_eq!(
        dispatcher.operations(),
        vec!["add", "divide", "multiply", "subtract"]
    );
    let none = Dispatcher::new(&FeatureSet::none());
    assert!(none.operations().is_empty());
}

#[test]
fn test_register_custom_operation() {
    let dispatcher = Dispatcher::builder(FeatureSet::waterfall())
        .register("power", f64::powf)
        .build();
    assert_eq!(dispatcher.dispatch("power", 2.0, 10.0), Ok(1024.0));
    assert!(dispatcher.dispatch("multiply", 2.0, 10.0).is_err());
}

#[test]
fn test_register_builtin_name_enables_its_feature() {
    let dispatcher = Dispatcher::builder(FeatureSet::waterfall())
        .register("multiply", |a, b| a * b)
        .build();
    assert_eq!(dispatcher.dispatch("multiply", 3.0, 4.0), Ok(12.0));
    assert!(dispatcher.features().is_enabled(Feature::Multiply));
    assert!(!dispatcher.features().is_enabled(Feature::Divide));
    assert!(!dispatcher.supports("divide"));
}

#[test]
fn test_custom_operation_leaves_table_unchanged() {
    let dispatcher = Dispatcher::builder(FeatureSet::waterfall())
        .register("power", f64::powf)
        .build();
    assert_eq!(*dispatcher.features(), FeatureSet::waterfall());
}

#[test]
fn test_dispatch_is_repeatable() {
    let dispatcher = agile();
    for op in Operation::ALL {
        let first = dispatcher.dispatch(op.name(), 6.5, 2.5).unwrap();
        let second = dispatcher.dispatch(op.name(), 6.5, 2.5).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn test_history_disabled_by_default() {
    let dispatcher = agile();
    dispatcher.dispatch("add", 1.0, 1.0).unwrap();
    assert!(!dispatcher.has_history());
    assert_eq!(
        dispatcher.history(),
        Err(CalcError::CapabilityDisabled("History".to_string()))
    );
    assert_eq!(
        dispatcher.history().unwrap_err().to_string(),
        "History feature not enabled yet."
    );
}

#[test]
fn test_history_records_successful_calls_in_order() {
    let dispatcher = Dispatcher::new(&FeatureSet::agile().with(Feature::History, true));
    assert!(dispatcher.history().unwrap().is_empty());

    dispatcher.dispatch("add", 2.0, 3.0).unwrap();
    assert_eq!(dispatcher.history().unwrap().len(), 1);
    dispatcher.dispatch("power", 2.0, 3.0).unwrap_err();
    assert_eq!(dispatcher.history().unwrap().len(), 1);
    dispatcher.dispatch("divide", 4.0, 0.0).unwrap();

    let history = dispatcher.history().unwrap();
    let ops: Vec<&str> = history.iter().map(|entry| entry.op.as_str()).collect();
    assert_eq!(ops, vec!["add", "divide"]);
    assert_eq!(history[0].result, 5.0);
    assert_eq!(history[1].a, 4.0);
    assert_eq!(history[1].b, 0.0);
    assert_eq!(history[1].result, f64::INFINITY);
}

#[test]
fn test_injected_history_sink_enables_history() {
    let dispatcher = Dispatcher::builder(FeatureSet::agile())
        .history(MemoryHistory::new())
        .build();
    dispatcher.dispatch("multiply", 3.0, 4.0).unwrap();
    assert_eq!(dispatcher.history().unwrap().len(), 1);
    assert!(dispatcher.features().is_enabled(Feature::History));
}

#[test]
fn test_metrics_track_dispatches() {
    let dispatcher = Dispatcher::new(&FeatureSet::agile().with(Feature::History, true));
    dispatcher.dispatch("add", 1.0, 2.0).unwrap();
    dispatcher.dispatch("divide", 1.0, 0.0).unwrap();
    dispatcher.dispatch("modulo", 1.0, 2.0).unwrap_err();

    let snapshot = dispatcher.metrics_snapshot();
    assert_eq!(snapshot.dispatched, 2);
    assert_eq!(snapshot.rejected, 1);
    assert_eq!(snapshot.sentinel_divisions, 1);
    assert_eq!(snapshot.history_appends, 2);

    dispatcher.reset_metrics();
    assert_eq!(dispatcher.metrics_snapshot().dispatched, 0);
}

#[test]
fn test_replaced_divide_is_not_counted_as_sentinel() {
    let dispatcher = Dispatcher::builder(FeatureSet::agile())
        .register("divide", |_, _| 0.0)
        .build();
    assert_eq!(dispatcher.dispatch("divide", 1.0, 0.0), Ok(0.0));
    let snapshot = dispatcher.metrics_snapshot();
    assert_eq!(snapshot.dispatched, 1);
    assert_eq!(snapshot.sentinel_divisions, 0);
}
