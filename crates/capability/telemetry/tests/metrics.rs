use dish_telemetry::{
    metrics, new_message_id, record_dropped_missing_status, record_dropped_parse_failure,
    record_fatal, record_forwarded, record_message_received,
};

#[test]
fn message_ids_are_unique() {
    let first = new_message_id();
    let second = new_message_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn counters_accumulate() {
    // 全局计数器在同一进程内共享，只比较增量
    let before = metrics().snapshot();
    record_message_received();
    record_message_received();
    record_forwarded();
    record_dropped_parse_failure();
    record_dropped_missing_status();
    record_fatal();
    let after = metrics().snapshot();

    assert!(after.messages_received >= before.messages_received + 2);
    assert!(after.records_forwarded > before.records_forwarded);
    assert!(after.dropped_total() >= before.dropped_total() + 2);
    assert!(after.fatal_errors > before.fatal_errors);
}
