use crate::runtime::built_ins::support::word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::Signal;
use crate::runtime::interpreter::Runtime;

pub fn register(runtime: &Runtime) {
    word(runtime, "true", " -- true", "Push the boolean true.", |rt| {
        rt.push(Value::Bool(true)).map_err(Signal::from)
    });

    word(runtime, "false", " -- false", "Push the boolean false.", |rt| {
        rt.push(Value::Bool(false)).map_err(Signal::from)
    });

    word(runtime, "and", "a b -- bool", "Logical and of two truthy values.", |rt| {
        let b = rt.pop_as_bool().map_err(Signal::from)?;
        let a = rt.pop_as_bool().map_err(Signal::from)?;
        rt.push(Value::Bool(a && b)).map_err(Signal::from)
    });

    word(runtime, "or", "a b -- bool", "Logical or of two truthy values.", |rt| {
        let b = rt.pop_as_bool().map_err(Signal::from)?;
        let a = rt.pop_as_bool().map_err(Signal::from)?;
        rt.push(Value::Bool(a || b)).map_err(Signal::from)
    });

    word(runtime, "not", "a -- bool", "Logical negation of a truthy value.", |rt| {
        let a = rt.pop_as_bool().map_err(Signal::from)?;
        rt.push(Value::Bool(!a)).map_err(Signal::from)
    });
}
