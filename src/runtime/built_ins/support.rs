use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::word::PrimitiveFn;
use crate::runtime::error::{script_error_str, Signal, SignalResult};
use crate::runtime::interpreter::Runtime;
use std::rc::Rc;

/// Wrap an ordinary synchronous closure as a `PrimitiveFn`. The overwhelming majority of
/// Borth's core words never suspend — only a handful of vocabulary-resolution primitives
/// (`using:`) actually await anything — so this is the common case every `register_*`
/// function in this module reaches for, and the async boundary is just an immediately-ready
/// future around the closure's own `Result`.
pub fn sync(f: impl Fn(&Runtime) -> SignalResult<()> + 'static) -> PrimitiveFn {
    let f = Rc::new(f);
    Rc::new(move |runtime: Runtime| {
        let f = f.clone();
        Box::pin(async move { f(&runtime) })
    })
}

/// Register a non-immediate native word into `core`.
pub fn word(
    runtime: &Runtime,
    name: &str,
    signature: &str,
    description: &str,
    f: impl Fn(&Runtime) -> SignalResult<()> + 'static,
) {
    runtime.expose(name, signature, description, sync(f));
}

/// Register an immediate native word into `core` — one that runs at compile time rather
/// than being appended to the body under construction.
pub fn immediate_word(
    runtime: &Runtime,
    name: &str,
    signature: &str,
    description: &str,
    f: impl Fn(&Runtime) -> SignalResult<()> + 'static,
) {
    runtime.expose_immediate(name, signature, description, sync(f));
}

/// Pop two numbers, applying `int_op` if both are integers and `float_op` otherwise (an
/// int paired with a float is promoted to float). This is the shape every binary
/// arithmetic/comparison word needs, so they all go through it rather than repeating the
/// promotion logic.
pub fn pop_numeric_pair(runtime: &Runtime) -> SignalResult<NumPair> {
    let b = runtime.pop().map_err(Signal::from)?;
    let a = runtime.pop().map_err(Signal::from)?;
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Ok(NumPair::Int(a, b)),
        (Value::Int(a), Value::Float(b)) => Ok(NumPair::Float(a as f64, b)),
        (Value::Float(a), Value::Int(b)) => Ok(NumPair::Float(a, b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(NumPair::Float(a, b)),
        (a, b) => script_error_str(
            runtime,
            &format!("expected two numbers, found a {} and a {}", a.type_name(), b.type_name()),
        )
        .map_err(Signal::from),
    }
}

pub enum NumPair {
    Int(i64, i64),
    Float(f64, f64),
}

/// Pop an array value, failing with a descriptive error if the top of stack isn't one.
pub fn pop_array(runtime: &Runtime) -> SignalResult<crate::runtime::data_structures::value::ArrayRef> {
    match runtime.pop().map_err(Signal::from)? {
        Value::Array(array) => Ok(array),
        other => script_error_str(runtime, &format!("expected an array, found a {}", other.type_name()))
            .map_err(Signal::from),
    }
}

/// Pop a record value, failing with a descriptive error if the top of stack isn't one.
pub fn pop_record(runtime: &Runtime) -> SignalResult<crate::runtime::data_structures::value::RecordRef> {
    match runtime.pop().map_err(Signal::from)? {
        Value::Record(record) => Ok(record),
        other => script_error_str(runtime, &format!("expected a record, found a {}", other.type_name()))
            .map_err(Signal::from),
    }
}
