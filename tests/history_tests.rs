use featurecalc::{HistoryEntry, HistorySink, MemoryHistory};

#[test]
fn test_memory_history_appends_in_order() {
    let history = MemoryHistory::new();
    assert!(history.is_empty());
    history.record(HistoryEntry::new("add", 1.0, 2.0, 3.0));
    history.record(HistoryEntry::new("subtract", 5.0, 2.0, 3.0));
    assert_eq!(history.len(), 2);
    let entries = history.entries();
    assert_eq!(entries[0].op, "add");
    assert_eq!(entries[1].op, "subtract");
}

#[test]
fn test_entries_returns_a_copy() {
    let history = MemoryHistory::new();
    history.record(HistoryEntry::new("add", 1.0, 1.0, 2.0));
    let mut snapshot = history.entries();
    snapshot.clear();
    assert_eq!(history.len(), 1);
}

#[test]
fn test_history_entry_serializes() {
    let entry = HistoryEntry::new("multiply", 3.0, 4.0, 12.0);
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["op"], "multiply");
    assert_eq!(value["result"], 12.0);
}
