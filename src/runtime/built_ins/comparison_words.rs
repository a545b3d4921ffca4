use crate::runtime::built_ins::support::{pop_numeric_pair, word, NumPair};
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::Signal;
use crate::runtime::interpreter::Runtime;

fn compare(pair: NumPair) -> std::cmp::Ordering {
    match pair {
        NumPair::Int(a, b) => a.cmp(&b),
        NumPair::Float(a, b) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
    }
}

pub fn register(runtime: &Runtime) {
    word(runtime, ">", "a b -- bool", "True if a is greater than b.", |rt| {
        let ordering = compare(pop_numeric_pair(rt)?);
        rt.push(Value::Bool(ordering.is_gt())).map_err(Signal::from)
    });

    word(runtime, ">=", "a b -- bool", "True if a is greater than or equal to b.", |rt| {
        let ordering = compare(pop_numeric_pair(rt)?);
        rt.push(Value::Bool(ordering.is_ge())).map_err(Signal::from)
    });

    word(runtime, "<", "a b -- bool", "True if a is less than b.", |rt| {
        let ordering = compare(pop_numeric_pair(rt)?);
        rt.push(Value::Bool(ordering.is_lt())).map_err(Signal::from)
    });

    word(runtime, "<=", "a b -- bool", "True if a is less than or equal to b.", |rt| {
        let ordering = compare(pop_numeric_pair(rt)?);
        rt.push(Value::Bool(ordering.is_le())).map_err(Signal::from)
    });

    word(runtime, "=", "a b -- bool", "True if a and b are equal.", |rt| {
        let b = rt.pop().map_err(Signal::from)?;
        let a = rt.pop().map_err(Signal::from)?;
        rt.push(Value::Bool(values_equal(&a, &b))).map_err(Signal::from)
    });

    word(runtime, "0=", "a -- bool", "True if a is zero (or the empty/none value).", |rt| {
        let a = rt.pop().map_err(Signal::from)?;
        let is_zero = match a {
            Value::Int(n) => n == 0,
            Value::Float(n) => n == 0.0,
            Value::Bool(b) => !b,
            Value::None => true,
            _ => false,
        };
        rt.push(Value::Bool(is_zero)).map_err(Signal::from)
    });
}

/// Structural equality for `=`. Numbers compare across int/float; arrays and records
/// compare element-wise; word references compare by identity, same as everywhere else in
/// the runtime.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Value::Record(a), Value::Record(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        (Value::Word(a), Value::Word(b)) => a == b,
        _ => false,
    }
}
