use crate::runtime::built_ins::support::word;
use crate::runtime::error::Signal;
use crate::runtime::interpreter::Runtime;

pub fn register(runtime: &Runtime) {
    word(runtime, "dup", "value -- value value", "Duplicate the top value on the stack.", |rt| {
        let value = rt.pop().map_err(Signal::from)?;
        rt.push(value.clone()).map_err(Signal::from)?;
        rt.push(value).map_err(Signal::from)
    });

    word(runtime, "drop", "value -- ", "Discard the top value on the stack.", |rt| {
        rt.pop().map_err(Signal::from)?;
        Ok(())
    });

    word(runtime, "swap", "a b -- b a", "Swap the top two values on the stack.", |rt| {
        let b = rt.pop().map_err(Signal::from)?;
        let a = rt.pop().map_err(Signal::from)?;
        rt.push(b).map_err(Signal::from)?;
        rt.push(a).map_err(Signal::from)
    });

    word(runtime, "over", "a b -- a b a", "Copy the second value to the top of the stack.", |rt| {
        let b = rt.pop().map_err(Signal::from)?;
        let a = rt.pop().map_err(Signal::from)?;
        rt.push(a.clone()).map_err(Signal::from)?;
        rt.push(b).map_err(Signal::from)?;
        rt.push(a).map_err(Signal::from)
    });

    word(runtime, "rot", "a b c -- b c a", "Rotate the top three values on the stack.", |rt| {
        let c = rt.pop().map_err(Signal::from)?;
        let b = rt.pop().map_err(Signal::from)?;
        let a = rt.pop().map_err(Signal::from)?;
        rt.push(b).map_err(Signal::from)?;
        rt.push(c).map_err(Signal::from)?;
        rt.push(a).map_err(Signal::from)
    });
}
