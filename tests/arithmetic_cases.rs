//! Table-driven checks for the arithmetic and comparison words across a spread of inputs,
//! including the negative-dividend `mod` case the spec calls out by name.

use borth::create_runtime;
use test_case::test_case;

#[test_case("2 3 +", 5; "addition")]
#[test_case("10 3 -", 7; "subtraction")]
#[test_case("6 7 *", 42; "multiplication")]
#[test_case("20 4 /", 5; "integer division")]
#[test_case("10 3 mod", 1; "positive mod")]
#[test_case("-10 3 mod", -1; "mod sign follows the dividend")]
#[test_case("-7 -2 mod", -1; "negative divisor keeps dividend sign")]
#[tokio::test]
async fn arithmetic(source: &str, expected: i64) {
    let runtime = create_runtime();
    runtime.run("<test>", source).await.unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), expected);
}

#[test_case("3 4 <", true; "less than")]
#[test_case("4 3 <", false; "not less than")]
#[test_case("4 3 >=", true; "greater or equal")]
#[test_case("3 3 >=", true; "equal counts as greater or equal")]
#[test_case("3 3 =", true; "numeric equality")]
#[test_case("0 0=", true; "zero check on zero")]
#[test_case("1 0=", false; "zero check on nonzero")]
#[test_case("true true and", true; "and both true")]
#[test_case("true false and", false; "and one false")]
#[test_case("false false or", false; "or both false")]
#[test_case("false true or", true; "or one true")]
#[test_case("true not", false; "not true")]
#[test_case("false not", true; "not false")]
#[tokio::test]
async fn comparisons_and_booleans(source: &str, expected: bool) {
    let runtime = create_runtime();
    runtime.run("<test>", source).await.unwrap();
    assert_eq!(runtime.pop_as_bool().unwrap(), expected);
}
