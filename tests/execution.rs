//! Exercises the executor end to end: arithmetic, booleans, control flow, strings,
//! collections, and the error conditions a script can trigger, all driven through
//! `Runtime::run` the same way a card or file would be.

use borth::create_runtime;

async fn run(source: &str) -> borth::Runtime {
    let runtime = create_runtime();
    runtime.run("<test>", source).await.expect("script should run cleanly");
    runtime
}

#[tokio::test]
async fn basic_arithmetic_and_stack_shuffling() {
    let runtime = run("2 3 + 4 *").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 20);
}

#[tokio::test]
async fn mod_sign_follows_the_dividend() {
    let runtime = run("-7 3 mod").await;
    assert_eq!(runtime.pop_as_int().unwrap(), -1);
}

#[tokio::test]
async fn division_by_zero_is_an_error_not_a_panic() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "1 0 /").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn comparisons_and_booleans() {
    let runtime = run("3 4 < true and").await;
    assert!(runtime.pop_as_bool().unwrap());

    let runtime = run("0 0=").await;
    assert!(runtime.pop_as_bool().unwrap());
}

#[tokio::test]
async fn dup_drop_swap_rot_over() {
    let runtime = run("1 2 3 rot").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 1);
    assert_eq!(runtime.pop_as_int().unwrap(), 3);
    assert_eq!(runtime.pop_as_int().unwrap(), 2);

    let runtime = run("5 dup +").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 10);

    let runtime = run("1 2 swap").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 1);
    assert_eq!(runtime.pop_as_int().unwrap(), 2);

    let runtime = run("1 2 over").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 1);
    assert_eq!(runtime.pop_as_int().unwrap(), 2);
    assert_eq!(runtime.pop_as_int().unwrap(), 1);
}

#[tokio::test]
async fn if_when_unless_choose_the_right_branch() {
    let runtime = run("true [ 1 ] [ 2 ] if").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 1);

    let runtime = run("false [ 1 ] [ 2 ] if").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 2);

    let runtime = run("true [ 9 ] when").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 9);

    let runtime = run("false [ 9 ] unless").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 9);
}

#[tokio::test]
async fn times_runs_n_times_with_the_index_pushed() {
    let runtime = run(": accumulate 0 5 [ + ] times ; accumulate").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 0 + 1 + 2 + 3 + 4);
}

#[tokio::test]
async fn exit_breaks_a_times_loop_early() {
    let runtime = run(
        ": stop-at-three 0 10 [ dup 3 = [ exit ] when 1 + ] times ;
         stop-at-three",
    )
    .await;
    assert_eq!(runtime.pop_as_int().unwrap(), 3);
}

#[tokio::test]
async fn map_filter_fold_each_over_a_built_array() {
    let runtime = run("5 iota [ 1 + ] map [ length ] do").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 5);

    let runtime = run("5 iota [ 2 mod 0= ] filter [ length ] do").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 3);

    let runtime = run("5 iota 0 [ + ] fold").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 0 + 1 + 2 + 3 + 4);
}

#[tokio::test]
async fn string_words() {
    let runtime = run("' hello ' world concat").await;
    assert_eq!(runtime.pop_as_string().unwrap(), "helloworld");

    let runtime = run("\"  hello  \" trim").await;
    assert_eq!(runtime.pop_as_string().unwrap(), "hello");

    let runtime = run("' hello.txt ' .txt endsWith").await;
    assert!(runtime.pop_as_bool().unwrap());

    let runtime = run("' banana ' ban startsWith").await;
    assert!(runtime.pop_as_bool().unwrap());

    let runtime = run("' banana ' nan includes").await;
    assert!(runtime.pop_as_bool().unwrap());

    let runtime = run("' a,b,c ' , split length").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 3);

    let runtime = run("' mississippi ' i ' _ rg").await;
    assert_eq!(runtime.pop_as_string().unwrap(), "m_ss_ss_pp_");
}

#[tokio::test]
async fn record_fields_can_be_set_and_read_back() {
    let runtime = run(
        "0 iota structure
         ' age 30 .set
         ' name ' alice .set
         ' age .get",
    )
    .await;
    assert_eq!(runtime.pop_as_int().unwrap(), 30);
}

#[tokio::test]
async fn keys_and_extract_agree_on_order() {
    let runtime = run(
        "0 iota structure
         ' age 30 .set
         ' name ' alice .set
         dup keys
         extract
         length",
    )
    .await;
    assert_eq!(runtime.pop_as_int().unwrap(), 2);
}

#[tokio::test]
async fn structure_rejects_a_non_pair_array() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "1 iota structure").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn nil_check_and_length_on_collections() {
    let runtime = run("3 iota length").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 3);

    let runtime = run("0 iota nil?").await;
    assert!(!runtime.pop_as_bool().unwrap());
}

#[tokio::test]
async fn defining_into_no_vocabulary_fails() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "variable counter").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn modifying_core_vocabulary_is_rejected() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "in: core ;").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn unknown_word_is_reported() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "totally-unbound-word").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn stack_underflow_is_reported_not_panicked() {
    let runtime = create_runtime();
    let result = runtime.run("<test>", "+").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn a_variable_can_be_written_and_then_reads_back_the_new_value() {
    let runtime = run(
        "in: counters ;
         variable counter
         counter",
    )
    .await;
    assert!(matches!(
        runtime.pop().unwrap(),
        borth::runtime::data_structures::value::Value::None
    ));

    let runtime = run(
        "in: counters ;
         variable counter
         41 write-to counter
         counter",
    )
    .await;
    assert_eq!(runtime.pop_as_int().unwrap(), 41);

    let runtime = run(
        "in: counters ;
         variable counter
         41 write-to counter
         99 write-to counter
         counter",
    )
    .await;
    assert_eq!(runtime.pop_as_int().unwrap(), 99);
}

#[tokio::test]
async fn quotations_are_first_class_values() {
    let runtime = run("[ 1 2 + ] do").await;
    assert_eq!(runtime.pop_as_int().unwrap(), 3);
}
