use crate::runtime::built_ins::support::{pop_array, word};
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::Signal;
use crate::runtime::interpreter::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

pub fn register(runtime: &Runtime) {
    word(runtime, "join", "array sep -- string", "Join an array of strings with a separator.", |rt| {
        let sep = rt.pop_as_string().map_err(Signal::from)?;
        let array = pop_array(rt)?;
        let joined = array.borrow().iter().map(|v| v.to_string()).collect::<Vec<_>>().join(&sep);
        rt.push(Value::String(joined)).map_err(Signal::from)
    });

    word(runtime, "split", "string sep -- array", "Split a string on a separator into an array of strings.", |rt| {
        let sep = rt.pop_as_string().map_err(Signal::from)?;
        let source = rt.pop_as_string().map_err(Signal::from)?;
        let parts: Vec<Value> = if sep.is_empty() {
            source.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            source.split(sep.as_str()).map(|part| Value::String(part.to_string())).collect()
        };
        rt.push(Value::Array(Rc::new(RefCell::new(parts)))).map_err(Signal::from)
    });

    word(runtime, "startsWith", "string prefix -- bool", "True if string begins with prefix.", |rt| {
        let prefix = rt.pop_as_string().map_err(Signal::from)?;
        let source = rt.pop_as_string().map_err(Signal::from)?;
        rt.push(Value::Bool(source.starts_with(&prefix))).map_err(Signal::from)
    });

    word(runtime, "endsWith", "string suffix -- bool", "True if string ends with suffix.", |rt| {
        let suffix = rt.pop_as_string().map_err(Signal::from)?;
        let source = rt.pop_as_string().map_err(Signal::from)?;
        rt.push(Value::Bool(source.ends_with(&suffix))).map_err(Signal::from)
    });

    word(runtime, "includes", "string needle -- bool", "True if string contains needle.", |rt| {
        let needle = rt.pop_as_string().map_err(Signal::from)?;
        let source = rt.pop_as_string().map_err(Signal::from)?;
        rt.push(Value::Bool(source.contains(&needle))).map_err(Signal::from)
    });

    word(runtime, "trim", "string -- string", "Trim leading and trailing whitespace.", |rt| {
        let source = rt.pop_as_string().map_err(Signal::from)?;
        rt.push(Value::String(source.trim().to_string())).map_err(Signal::from)
    });

    word(runtime, "rg", "string old new -- string", "Replace every occurrence of old with new.", |rt| {
        let new = rt.pop_as_string().map_err(Signal::from)?;
        let old = rt.pop_as_string().map_err(Signal::from)?;
        let source = rt.pop_as_string().map_err(Signal::from)?;
        rt.push(Value::String(source.replace(&old, &new))).map_err(Signal::from)
    });

    word(runtime, "concat", "a b -- string", "Concatenate the string forms of a and b.", |rt| {
        let b = rt.pop().map_err(Signal::from)?;
        let a = rt.pop().map_err(Signal::from)?;
        rt.push(Value::String(format!("{}{}", a, b))).map_err(Signal::from)
    });
}
