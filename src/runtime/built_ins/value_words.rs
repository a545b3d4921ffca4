use crate::runtime::built_ins::support::word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::{script_error_str, Signal};
use crate::runtime::interpreter::Runtime;

pub fn register(runtime: &Runtime) {
    word(runtime, "now", " -- timestamp", "Push the current Unix timestamp, in milliseconds.", |rt| {
        let millis = chrono::Utc::now().timestamp_millis();
        rt.push(Value::Int(millis)).map_err(Signal::from)
    });

    word(runtime, "length", "value -- n", "The length of a string, array, or record.", |rt| {
        let value = rt.pop().map_err(Signal::from)?;
        let length = match &value {
            Value::String(s) => s.chars().count() as i64,
            Value::Array(array) => array.borrow().len() as i64,
            Value::Record(record) => record.borrow().len() as i64,
            other => return script_error_str(rt, &format!("length: no length for a {}", other.type_name())).map_err(Signal::from),
        };
        rt.push(Value::Int(length)).map_err(Signal::from)
    });

    word(runtime, "nil?", "value -- bool", "True if value is none.", |rt| {
        let value = rt.pop().map_err(Signal::from)?;
        rt.push(Value::Bool(matches!(value, Value::None))).map_err(Signal::from)
    });

    word(runtime, "words", " -- string", "List every word currently visible, one per line.", |rt| {
        rt.push(Value::String(rt.all_words().to_string())).map_err(Signal::from)
    });
}
