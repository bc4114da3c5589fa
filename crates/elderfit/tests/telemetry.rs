use elderfit::telemetry;

#[test]
fn test_init_is_idempotent() {
    telemetry::init();
    assert!(tracing::dispatcher::has_been_set());

    // A second install finds the global subscriber taken and returns quietly.
    telemetry::init();
    assert!(tracing::dispatcher::has_been_set());
    tracing::info!(generation = 1_u64, "subscriber still accepts events");
}
