//! The `chron-*` words, which are a thin script-facing shim over `ChronRegistry` rather
//! than part of the stack machine itself.

use borth::create_runtime;

#[tokio::test]
async fn elapsed_ms_is_none_before_a_timer_is_started() {
    let runtime = create_runtime();
    runtime.run("<test>", "' never-started chron-elapsed-ms").await.expect("script should run cleanly");
    assert!(matches!(runtime.pop().unwrap(), borth::runtime::data_structures::value::Value::None));
}

#[tokio::test]
async fn a_started_timer_reports_a_growing_elapsed_time() {
    let runtime = create_runtime();
    runtime
        .run(
            "<test>",
            "' lap chron-start
             ' lap chron-elapsed-ms",
        )
        .await
        .expect("script should run cleanly");
    assert!(runtime.pop_as_int().unwrap() >= 0);
}

#[tokio::test]
async fn clear_forgets_a_timer_so_elapsed_is_none_again() {
    let runtime = create_runtime();
    runtime
        .run(
            "<test>",
            "' lap chron-start
             ' lap chron-clear
             ' lap chron-elapsed-ms",
        )
        .await
        .expect("script should run cleanly");
    assert!(matches!(runtime.pop().unwrap(), borth::runtime::data_structures::value::Value::None));
}

#[tokio::test]
async fn stop_all_clears_every_timer_at_once() {
    let runtime = create_runtime();
    runtime
        .run(
            "<test>",
            "' a chron-start
             ' b chron-start
             chron-stop-all
             ' a chron-elapsed-ms",
        )
        .await
        .expect("script should run cleanly");
    assert!(matches!(runtime.pop().unwrap(), borth::runtime::data_structures::value::Value::None));
    assert!(runtime.chrons().names().is_empty());
}
