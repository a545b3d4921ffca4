use crate::runtime::data_structures::word::{body_word_refs, BodyItem, WordKind, WordRef};
use crate::runtime::interpreter::Runtime;

/// Rebuild `dependent`'s compiled body so that every named word it executes points at
/// whatever that name currently resolves to, then re-establish the bidirectional reference
/// edges for the new body.
///
/// This only ever touches `dependent` itself. It is not recursive: `dependent`'s own
/// dependents don't need a recompile of their own, because `dependent`'s identity hasn't
/// changed — anyone holding a reference to it still reaches the same object, and that
/// object's behavior has already changed in place. A word that (directly or through a chain
/// of quotations) ends up referencing itself is handled the same way: resolving its own name
/// against the runtime just finds itself again, so there is nothing to loop on.
///
/// Resolution here goes through `runtime.find`, i.e. against whatever is `current` and
/// loaded *right now* — not necessarily the vocabulary `dependent` itself was originally
/// defined in. If that vocabulary is no longer loaded, or `current` has moved on, the
/// rewalk can legitimately land on an unrelated word of the same name. This is the source
/// behavior, documented as an open question rather than a bug to guard against.
pub fn recompile(runtime: &Runtime, dependent: &WordRef) {
    let old_body = {
        let data = dependent.borrow();
        match &data.kind {
            WordKind::Compiled(body) => body.clone(),
            _ => return,
        }
    };

    for referenced in body_word_refs(&old_body) {
        referenced.borrow_mut().referenced_by.remove(dependent);
    }

    tracing::debug!(word = ?dependent.name(), "recompiling dependent after redefinition");

    let mut new_body = Vec::with_capacity(old_body.len());
    for item in old_body {
        match item {
            BodyItem::Execute(old_word) => {
                let resolved = old_word
                    .name()
                    .as_deref()
                    .and_then(|name| runtime.find(name))
                    .unwrap_or_else(|| old_word.clone());

                if resolved != old_word {
                    let old_vocabulary = old_word.borrow().vocabulary.as_ref().and_then(|v| v.upgrade()).map(|v| v.name());
                    let new_vocabulary = resolved.borrow().vocabulary.as_ref().and_then(|v| v.upgrade()).map(|v| v.name());
                    if old_vocabulary != new_vocabulary {
                        tracing::warn!(
                            word = ?old_word.name(),
                            from = ?old_vocabulary,
                            to = ?new_vocabulary,
                            "recompile rewalk resolved a reference into a different vocabulary than it was originally bound in"
                        );
                    }
                }

                new_body.push(BodyItem::Execute(resolved));
            }
            literal @ BodyItem::PushLiteral(_) => new_body.push(literal),
        }
    }

    let new_refs = body_word_refs(&new_body);
    for referenced in &new_refs {
        referenced.borrow_mut().referenced_by.insert(dependent.clone());
    }

    let mut data = dependent.borrow_mut();
    data.kind = WordKind::Compiled(new_body);
    data.references = new_refs.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::data_structures::value::Value;
    use crate::runtime::data_structures::word::WordRef;

    #[test]
    fn constructing_a_compiled_word_wires_up_referenced_by() {
        // a word's `referenced_by` set is exactly who needs rewiring on redefinition; a
        // transitive caller's identity is untouched, so it keeps working through whatever
        // its direct dependent gets rewired to.
        let a = WordRef::new_variable("a", Value::Int(1));
        let b = WordRef::new_compiled(Some("b"), vec![BodyItem::Execute(a.clone())]);
        assert!(a.borrow().referenced_by.contains(&b));

        let c = WordRef::new_compiled(Some("c"), vec![BodyItem::Execute(b.clone())]);
        assert!(b.borrow().referenced_by.contains(&c));
        assert!(!a.borrow().referenced_by.contains(&c));
    }
}
