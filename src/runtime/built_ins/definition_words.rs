use crate::runtime::built_ins::support::{immediate_word, word};
use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::vocabulary::VocabularyRef;
use crate::runtime::data_structures::word::WordRef;
use crate::runtime::error::{script_error_str, Signal};
use crate::runtime::interpreter::runtime::CompileKind;
use crate::runtime::interpreter::Runtime;

/// Read the next raw token's text, failing with a uniform message if the input has run out.
/// Every definition word that parses its own name (`:`, `:_`, `syn:`, `variable`, `write-to`,
/// `in:`) needs this; none of them want to silently no-op at end of input the way `next` does.
fn expect_raw_word(runtime: &Runtime, context: &str) -> Result<String, Signal> {
    match runtime.next_raw_word().map_err(Signal::from)? {
        Some((_, text)) => Ok(text),
        None => script_error_str(runtime, &format!("unexpected end of input in {}", context)).map_err(Signal::from),
    }
}

pub fn register(runtime: &Runtime) {
    immediate_word(runtime, ":", "<name> ... ; -- ", "Begin a named definition.", |rt| {
        let name = expect_raw_word(rt, ":")?;
        rt.begin_compiling(CompileKind::Definition { name, immediate: false, private: false });
        Ok(())
    });

    immediate_word(runtime, ":_", "<name> ... ; -- ", "Begin a private named definition.", |rt| {
        let name = expect_raw_word(rt, ":_")?;
        rt.begin_compiling(CompileKind::Definition { name, immediate: false, private: true });
        Ok(())
    });

    immediate_word(runtime, ";", " -- ", "Close a named or quoted definition begun with `:`/`syn:`/`[`.", |rt| {
        rt.end_compiling().map_err(Signal::from)
    });

    immediate_word(runtime, "syn:", "<name> ... ; -- ", "Begin an immediate named definition.", |rt| {
        let name = expect_raw_word(rt, "syn:")?;
        rt.begin_compiling(CompileKind::Definition { name, immediate: true, private: false });
        Ok(())
    });

    immediate_word(runtime, "variable", "<name> -- ", "Create a mutable variable in the current vocabulary.", |rt| {
        let name = expect_raw_word(rt, "variable")?;
        let word = WordRef::new_variable(&name, Value::None);
        rt.define(&name, word).map_err(Signal::from)
    });

    immediate_word(runtime, "write-to", "value <name> -- ", "Pop a value and store it into the named variable.", |rt| {
        let name = expect_raw_word(rt, "write-to")?;
        let word = match rt.find(&name) {
            Some(word) => word,
            None => return script_error_str(rt, &format!("write-to: word not found: {}", name)).map_err(Signal::from),
        };
        let value = rt.pop().map_err(Signal::from)?;
        rt.write_variable(&word, value).map_err(Signal::from)
    });

    immediate_word(runtime, "[", " -- ", "Begin an anonymous quotation.", |rt| {
        rt.begin_compiling(CompileKind::Quotation);
        Ok(())
    });

    immediate_word(runtime, "]", " -- quotation", "Close a quotation begun with `[`, pushing it as a value.", |rt| {
        rt.end_compiling().map_err(Signal::from)
    });

    immediate_word(runtime, "'", " -- string", "Parse one following token as a literal string.", |rt| {
        let text = expect_raw_word(rt, "'")?;
        rt.literal(Value::String(text))
    });

    immediate_word(runtime, "\"\"", " -- \"\"", "Push (or compile) an empty string literal.", |rt| {
        rt.literal(Value::String(String::new()))
    });

    immediate_word(runtime, "(", " -- ", "A comment, read and discarded up to the next `)`.", |rt| {
        rt.parse_until(')').map(|_| ()).map_err(Signal::from)
    });

    immediate_word(runtime, "in:", "<name> ; -- ", "Select or create the named vocabulary as current.", |rt| {
        let name = expect_raw_word(rt, "in:")?;
        if name == crate::runtime::interpreter::ROOT_VOCABULARY {
            return script_error_str(rt, "cannot modify core vocabulary").map_err(Signal::from);
        }

        let vocabulary = rt.find_vocabulary(&name).unwrap_or_else(|| {
            let vocabulary = VocabularyRef::new(&name);
            rt.register_vocabulary(vocabulary.clone());
            vocabulary
        });

        rt.set_current_vocabulary(vocabulary).map_err(Signal::from)?;

        // `in:` is written `in: <name> ;` in source; the trailing `;` is consumed here rather
        // than by the `;` word, since `in:` never opens a compiled body for `;` to close.
        let _ = rt.next_raw_word().map_err(Signal::from)?;
        Ok(())
    });

    // `using:` genuinely suspends (resolving an unloaded vocabulary may await its factory),
    // so unlike the rest of this module it bypasses the synchronous `immediate_word` helper
    // and is exposed directly the way the async control words in `control_words` are.
    runtime.expose_immediate(
        "using:",
        "<name> [<name> ...] ; -- ",
        "Import one or more vocabularies into the current vocabulary's dependency list.",
        std::rc::Rc::new(using_word),
    );

    immediate_word(runtime, "opt:", "<key> <val> -- ", "Set an option; val=nil deletes it.", |rt| {
        let key = expect_raw_word(rt, "opt:")?;
        let value = expect_raw_word(rt, "opt:")?;
        if value == "nil" {
            rt.remove_option(&key);
        } else {
            rt.set_option(&key, &value);
        }
        Ok(())
    });

    word(runtime, "opt", "key -- value", "Read the current value of an option, or none if unset.", |rt| {
        let key = rt.pop_as_string().map_err(Signal::from)?;
        match rt.option(&key) {
            Some(value) => rt.push(Value::String(value)).map_err(Signal::from),
            None => rt.push(Value::None).map_err(Signal::from),
        }
    });

    word(runtime, "immediate", " -- ", "Mark the most recently defined word immediate.", |rt| {
        match rt.last_defined() {
            Some(word) => {
                word.borrow_mut().immediate = true;
                Ok(())
            }
            None => script_error_str(rt, "immediate: nothing has been defined yet").map_err(Signal::from),
        }
    });
}

fn using_word(runtime: Runtime) -> crate::runtime::data_structures::word::PrimitiveFuture {
    Box::pin(async move {
        loop {
            let name = match runtime.next_raw_word().map_err(Signal::from)? {
                Some((_, text)) if text == ";" => break,
                Some((_, text)) => text,
                None => break,
            };

            let vocabulary = match runtime.find_vocabulary(&name) {
                Some(vocabulary) => vocabulary,
                None => runtime.resolver().resolve(&runtime, &name).await.map_err(Signal::from)?,
            };

            let Some(current) = runtime.current_vocabulary() else {
                return script_error_str(&runtime, "requires current vocabulary").map_err(Signal::from);
            };

            current.add_import(vocabulary);
        }

        Ok(())
    })
}
