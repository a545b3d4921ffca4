use crate::runtime::built_ins::support::{pop_array, word};
use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::word::PrimitiveFuture;
use crate::runtime::error::{script_error_str, Signal, SignalResult};
use crate::runtime::interpreter::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

pub fn register(runtime: &Runtime) {
    runtime.expose("do", "quotation -- ...", "Execute a quotation popped off the stack.", Rc::new(do_word));

    runtime.expose(
        "if",
        "flag true-quote false-quote -- ...",
        "Run true-quote if flag is truthy, otherwise false-quote.",
        Rc::new(if_word),
    );

    runtime.expose("when", "flag quote -- ...", "Run quote if flag is truthy.", Rc::new(when_word));

    runtime.expose("unless", "flag quote -- ...", "Run quote if flag is falsy.", Rc::new(unless_word));

    runtime.expose(
        "times",
        "n quote -- ...",
        "Run quote n times, pushing the 0-based iteration index before each run.",
        Rc::new(times_word),
    );

    runtime.expose(
        "each",
        "array quote -- ",
        "Run quote once per array element, with the element pushed first.",
        Rc::new(each_word),
    );

    runtime.expose(
        "map",
        "array quote -- new-array",
        "Build a new array by running quote (element -- result) over each element.",
        Rc::new(map_word),
    );

    runtime.expose(
        "filter",
        "array quote -- new-array",
        "Build a new array of the elements for which quote (element -- bool) is truthy.",
        Rc::new(filter_word),
    );

    runtime.expose(
        "fold",
        "array init quote -- result",
        "Reduce array to a single value via quote (accumulator element -- accumulator).",
        Rc::new(fold_word),
    );

    runtime.expose(
        "next",
        " -- ",
        "Consume and execute one more token from the still-open input stream.",
        Rc::new(next_word),
    );

    word(runtime, "exit", " -- ", "Unwind to the nearest enclosing loop boundary.", |_rt| Err(Signal::Exit));

    word(runtime, "err", "message -- ", "Abort with the given error message.", |rt| {
        let message = rt.pop_as_string().map_err(Signal::from)?;
        script_error_str(rt, &message).map_err(Signal::from)
    });
}

fn do_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quotation = runtime.pop_as_word().map_err(Signal::from)?;
        runtime.execute_word(quotation).await
    })
}

fn if_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let false_quote = runtime.pop_as_word().map_err(Signal::from)?;
        let true_quote = runtime.pop_as_word().map_err(Signal::from)?;
        let flag = runtime.pop_as_bool().map_err(Signal::from)?;

        runtime.execute_word(if flag { true_quote } else { false_quote }).await
    })
}

fn when_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let flag = runtime.pop_as_bool().map_err(Signal::from)?;

        if flag {
            runtime.execute_word(quote).await
        } else {
            Ok(())
        }
    })
}

fn unless_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let flag = runtime.pop_as_bool().map_err(Signal::from)?;

        if !flag {
            runtime.execute_word(quote).await
        } else {
            Ok(())
        }
    })
}

/// Run `quotation` once, treating `Exit` as "stop iterating here" rather than letting it
/// unwind further. This is the one loop boundary `Exit` is recognized at.
async fn run_iteration(runtime: &Runtime, quotation: &crate::runtime::data_structures::word::WordRef) -> SignalResult<bool> {
    match runtime.execute_word(quotation.clone()).await {
        Ok(()) => Ok(true),
        Err(Signal::Exit) => Ok(false),
        Err(error) => Err(error),
    }
}

fn times_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let count = runtime.pop_as_int().map_err(Signal::from)?;

        for index in 0..count {
            runtime.push(Value::Int(index)).map_err(Signal::from)?;
            if !run_iteration(&runtime, &quote).await? {
                break;
            }
        }

        Ok(())
    })
}

fn each_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let array = pop_array(&runtime)?;
        let items: Vec<Value> = array.borrow().clone();

        for item in items {
            runtime.push(item).map_err(Signal::from)?;
            if !run_iteration(&runtime, &quote).await? {
                break;
            }
        }

        Ok(())
    })
}

fn map_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let array = pop_array(&runtime)?;
        let items: Vec<Value> = array.borrow().clone();

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            runtime.push(item).map_err(Signal::from)?;
            if !run_iteration(&runtime, &quote).await? {
                break;
            }
            results.push(runtime.pop().map_err(Signal::from)?);
        }

        runtime
            .push(Value::Array(Rc::new(RefCell::new(results))))
            .map_err(Signal::from)
    })
}

fn filter_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let array = pop_array(&runtime)?;
        let items: Vec<Value> = array.borrow().clone();

        let mut kept = Vec::new();
        for item in items {
            runtime.push(item.clone()).map_err(Signal::from)?;
            if !run_iteration(&runtime, &quote).await? {
                break;
            }
            if runtime.pop_as_bool().map_err(Signal::from)? {
                kept.push(item);
            }
        }

        runtime.push(Value::Array(Rc::new(RefCell::new(kept)))).map_err(Signal::from)
    })
}

fn fold_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move {
        let quote = runtime.pop_as_word().map_err(Signal::from)?;
        let mut accumulator = runtime.pop().map_err(Signal::from)?;
        let array = pop_array(&runtime)?;
        let items: Vec<Value> = array.borrow().clone();

        for item in items {
            runtime.push(accumulator).map_err(Signal::from)?;
            runtime.push(item).map_err(Signal::from)?;
            if !run_iteration(&runtime, &quote).await? {
                return script_error_str(&runtime, "exit inside fold is not supported").map_err(Signal::from);
            }
            accumulator = runtime.pop().map_err(Signal::from)?;
        }

        runtime.push(accumulator).map_err(Signal::from)
    })
}

fn next_word(runtime: Runtime) -> PrimitiveFuture {
    Box::pin(async move { runtime.execute_next_token().await })
}
