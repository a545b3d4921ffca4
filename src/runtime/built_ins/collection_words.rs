use crate::runtime::built_ins::support::{pop_array, pop_record, word};
use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::word::{BodyItem, WordRef};
use crate::runtime::error::{script_error_str, Signal};
use crate::runtime::interpreter::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

pub fn register(runtime: &Runtime) {
    word(runtime, ".get", "record key -- value", "Read a field, or none if it isn't set.", |rt| {
        let key = rt.pop_as_string().map_err(Signal::from)?;
        let record = pop_record(rt)?;
        let value = record.borrow().get(&key).cloned().unwrap_or(Value::None);
        rt.push(value).map_err(Signal::from)
    });

    word(runtime, ".set", "record key value -- record", "Write a field, pushing the same record back.", |rt| {
        let value = rt.pop().map_err(Signal::from)?;
        let key = rt.pop_as_string().map_err(Signal::from)?;
        let record = pop_record(rt)?;
        record.borrow_mut().insert(key, value);
        rt.push(Value::Record(record)).map_err(Signal::from)
    });

    word(runtime, "keys", "record -- array", "The record's field names, in sorted order.", |rt| {
        let record = pop_record(rt)?;
        let mut names: Vec<String> = record.borrow().keys().cloned().collect();
        names.sort();
        let keys = names.into_iter().map(Value::String).collect();
        rt.push(Value::Array(Rc::new(RefCell::new(keys)))).map_err(Signal::from)
    });

    word(runtime, "values", "record -- array", "The record's field values, ordered the same as keys.", |rt| {
        let record = pop_record(rt)?;
        let mut names: Vec<String> = record.borrow().keys().cloned().collect();
        names.sort();
        let values = {
            let record = record.borrow();
            names.iter().map(|name| record.get(name).cloned().unwrap_or(Value::None)).collect()
        };
        rt.push(Value::Array(Rc::new(RefCell::new(values)))).map_err(Signal::from)
    });

    word(
        runtime,
        "structure",
        "array -- record",
        "Build a record from an array of [key value] pairs.",
        |rt| {
            let pairs = pop_array(rt)?;
            let mut record = std::collections::HashMap::new();
            for pair in pairs.borrow().iter() {
                let Value::Array(pair) = pair else {
                    return script_error_str(rt, "structure: expected an array of [key value] pairs").map_err(Signal::from);
                };
                let pair = pair.borrow();
                let [key, value] = &pair[..] else {
                    return script_error_str(rt, "structure: expected a 2-element [key value] pair").map_err(Signal::from);
                };
                let Value::String(key) = key else {
                    return script_error_str(rt, "structure: pair key must be a string").map_err(Signal::from);
                };
                record.insert(key.clone(), value.clone());
            }
            rt.push(Value::Record(Rc::new(RefCell::new(record)))).map_err(Signal::from)
        },
    );

    word(runtime, "extract", "record keys -- array", "Pull the named fields out into an array, in order.", |rt| {
        let keys = pop_array(rt)?;
        let record = pop_record(rt)?;
        let record = record.borrow();
        let mut extracted = Vec::with_capacity(keys.borrow().len());
        for key in keys.borrow().iter() {
            let Value::String(key) = key else {
                return script_error_str(rt, "extract: keys must be strings").map_err(Signal::from);
            };
            extracted.push(record.get(key).cloned().unwrap_or(Value::None));
        }
        rt.push(Value::Array(Rc::new(RefCell::new(extracted)))).map_err(Signal::from)
    });

    word(runtime, "index", "array n -- value", "Read the nth element of an array.", |rt| {
        let n = rt.pop_as_usize().map_err(Signal::from)?;
        let array = pop_array(rt)?;
        let value = {
            let array = array.borrow();
            match array.get(n) {
                Some(value) => value.clone(),
                None => {
                    return script_error_str(rt, &format!("index: {} is out of bounds (len {})", n, array.len()))
                        .map_err(Signal::from)
                }
            }
        };
        rt.push(value).map_err(Signal::from)
    });

    word(runtime, "iota", "n -- array", "An array of the integers 0..n.", |rt| {
        let n = rt.pop_as_usize().map_err(Signal::from)?;
        let values = (0..n as i64).map(Value::Int).collect();
        rt.push(Value::Array(Rc::new(RefCell::new(values)))).map_err(Signal::from)
    });

    word(runtime, "quote", "value -- quotation", "Wrap a value in a zero-argument quotation that pushes it.", |rt| {
        let value = rt.pop().map_err(Signal::from)?;
        let quotation = WordRef::new_compiled(None, vec![BodyItem::PushLiteral(value)]);
        rt.push(Value::Word(quotation)).map_err(Signal::from)
    });
}
