use crate::runtime::built_ins::support::{pop_numeric_pair, word, NumPair};
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{script_error_str, Signal};
use crate::runtime::interpreter::Runtime;

pub fn register(runtime: &Runtime) {
    word(runtime, "+", "a b -- sum", "Add two numbers.", |rt| {
        let result = match pop_numeric_pair(rt)? {
            NumPair::Int(a, b) => Value::Int(a.wrapping_add(b)),
            NumPair::Float(a, b) => Value::Float(a + b),
        };
        rt.push(result).map_err(Signal::from)
    });

    word(runtime, "-", "a b -- difference", "Subtract b from a.", |rt| {
        let result = match pop_numeric_pair(rt)? {
            NumPair::Int(a, b) => Value::Int(a.wrapping_sub(b)),
            NumPair::Float(a, b) => Value::Float(a - b),
        };
        rt.push(result).map_err(Signal::from)
    });

    word(runtime, "*", "a b -- product", "Multiply two numbers.", |rt| {
        let result = match pop_numeric_pair(rt)? {
            NumPair::Int(a, b) => Value::Int(a.wrapping_mul(b)),
            NumPair::Float(a, b) => Value::Float(a * b),
        };
        rt.push(result).map_err(Signal::from)
    });

    word(runtime, "/", "a b -- quotient", "Divide a by b.", |rt| {
        let result = match pop_numeric_pair(rt)? {
            NumPair::Int(_, 0) => return script_error_str(rt, "division by zero").map_err(Signal::from),
            NumPair::Int(a, b) => Value::Int(a / b),
            NumPair::Float(a, b) => Value::Float(a / b),
        };
        rt.push(result).map_err(Signal::from)
    });

    // The remainder's sign follows the dividend, matching Rust's `%` (and unlike
    // `div_euclid`/`rem_euclid`, which always return a non-negative remainder).
    word(runtime, "mod", "a b -- remainder", "Remainder of a divided by b; sign follows the dividend.", |rt| {
        let result = match pop_numeric_pair(rt)? {
            NumPair::Int(_, 0) => return script_error_str(rt, "division by zero").map_err(Signal::from),
            NumPair::Int(a, b) => Value::Int(a % b),
            NumPair::Float(a, b) => Value::Float(a % b),
        };
        rt.push(result).map_err(Signal::from)
    });
}
