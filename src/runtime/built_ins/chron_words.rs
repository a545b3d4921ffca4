use crate::runtime::built_ins::support::word;
use crate::runtime::data_structures::value::Value;
use crate::runtime::error::Signal;
use crate::runtime::interpreter::Runtime;

pub fn register(runtime: &Runtime) {
    word(runtime, "chron-start", "name -- ", "(Re)start a named timer.", |rt| {
        let name = rt.pop_as_string().map_err(Signal::from)?;
        rt.chrons().start(&name);
        Ok(())
    });

    word(
        runtime,
        "chron-elapsed-ms",
        "name -- ms",
        "Milliseconds since the named timer was started, or none if it was never started.",
        |rt| {
            let name = rt.pop_as_string().map_err(Signal::from)?;
            match rt.chrons().elapsed_ms(&name) {
                Some(ms) => rt.push(Value::Int(ms as i64)).map_err(Signal::from),
                None => rt.push(Value::None).map_err(Signal::from),
            }
        },
    );

    word(runtime, "chron-clear", "name -- ", "Discard the named timer.", |rt| {
        let name = rt.pop_as_string().map_err(Signal::from)?;
        rt.chrons().clear(&name);
        Ok(())
    });

    word(runtime, "chron-stop-all", " -- ", "Discard every running timer.", |rt| {
        rt.chrons().stop_all();
        Ok(())
    });
}
