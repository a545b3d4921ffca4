use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::vocabulary::VocabularyWeakRef;
use chrono::{DateTime, Utc};
use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashSet,
    fmt::{self, Debug, Formatter},
    future::Future,
    pin::Pin,
    rc::Rc,
};
use uuid::Uuid;

/// One entry in a compiled body: either "execute this word" or "push this literal value".
/// Splitting the two keeps the reference walk (which only ever cares about `Execute`) cheap
/// and makes the runtime's dispatch loop a single match instead of a kind check per item.
#[derive(Clone)]
pub enum BodyItem {
    Execute(WordRef),
    PushLiteral(Value),
}

/// A compiled body: what `:`/`;` and `[`/`]` produce. A flat, ordered sequence — no jump
/// addressing, since execution always resolves the next item by following its own
/// reference rather than an instruction pointer offset.
pub type CompiledBody = Vec<BodyItem>;

/// Where a word's definition came from: which card, which version of that card, and when it
/// was bound. Preserved across a rebind that only recompiles the body (the card/version
/// don't change unless the word is itself redefined from a new `define`).
#[derive(Clone)]
pub struct Provenance {
    pub card_id: Uuid,
    pub version: i64,
    pub defined_at: DateTime<Utc>,
}

pub type PrimitiveFuture = Pin<Box<dyn Future<Output = crate::runtime::error::SignalResult<()>>>>;

/// A native word's implementation. Takes an owned, cheaply-cloned handle to the runtime
/// rather than a borrowed reference, since the future it returns may hold the handle across
/// an `.await` point (resolving a `using:` vocabulary, running a card) where a borrow
/// wouldn't survive.
pub type PrimitiveFn = Rc<dyn Fn(crate::runtime::interpreter::Runtime) -> PrimitiveFuture>;

/// What a word actually does when executed.
pub enum WordKind {
    /// A native Rust function.
    Primitive {
        function: PrimitiveFn,
        signature: String,
        description: String,
    },

    /// A mutable single-value slot. Executing it reads the slot; `write-to` writes it.
    Variable(Value),

    /// A compiled Forth definition: a flat body of word executions and literal pushes.
    Compiled(CompiledBody),
}

impl Debug for WordKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WordKind::Primitive { .. } => write!(f, "Primitive"),
            WordKind::Variable(_) => write!(f, "Variable"),
            WordKind::Compiled(body) => write!(f, "Compiled({} items)", body.len()),
        }
    }
}

/// The data behind a `WordRef`. Never constructed directly outside of `Word::new*`; always
/// reached through the `Rc<RefCell<_>>` handle so that the reference graph can compare words
/// by identity.
pub struct WordData {
    /// `None` for quotations: an anonymous compiled body pushed as a value rather than
    /// installed into a vocabulary under a name.
    pub name: Option<String>,

    /// Executed immediately at compile time instead of being appended to the body under
    /// construction. Used for the handful of words (`:`, `;`, `[`, `]`, `in:`, `using:`, ...)
    /// that manipulate the target stack and mode themselves.
    pub immediate: bool,

    /// Invisible to lookups from any vocabulary other than the one that owns it.
    pub private: bool,

    /// Back-reference to the owning vocabulary. `Weak` so that a vocabulary's strong
    /// ownership of its words (via its name table) doesn't become a reference cycle.
    pub vocabulary: Option<VocabularyWeakRef>,

    pub kind: WordKind,

    /// Words this word's compiled body directly executes or carries as a literal quotation.
    /// Empty for primitives and variables.
    pub references: HashSet<WordRef>,

    /// Words whose compiled body directly references this one. When this word is redefined,
    /// exactly these words get recompiled — not their dependents in turn, since their own
    /// identity hasn't changed and they still reach the rest of the graph by pointer.
    pub referenced_by: HashSet<WordRef>,

    /// Card/version/timestamp this word was defined from, if it was defined from a stored
    /// card rather than typed directly into a runtime.
    pub provenance: Option<Provenance>,
}

/// A reference-counted, identity-comparable handle to a word. Two `WordRef`s are equal iff
/// they point at the same underlying object — never by comparing names or contents, since a
/// redefinition deliberately produces a *new* object under an old name while dependents keep
/// pointing at the old one until they're recompiled.
#[derive(Clone)]
pub struct WordRef(Rc<RefCell<WordData>>);

impl WordRef {
    fn wrap(data: WordData) -> WordRef {
        WordRef(Rc::new(RefCell::new(data)))
    }

    pub fn new_primitive(
        name: &str,
        immediate: bool,
        signature: &str,
        description: &str,
        function: PrimitiveFn,
    ) -> WordRef {
        WordRef::wrap(WordData {
            name: Some(name.to_string()),
            immediate,
            private: false,
            vocabulary: None,
            kind: WordKind::Primitive {
                function,
                signature: signature.to_string(),
                description: description.to_string(),
            },
            references: HashSet::new(),
            referenced_by: HashSet::new(),
            provenance: None,
        })
    }

    pub fn new_variable(name: &str, initial: Value) -> WordRef {
        WordRef::wrap(WordData {
            name: Some(name.to_string()),
            immediate: false,
            private: false,
            vocabulary: None,
            kind: WordKind::Variable(initial),
            references: HashSet::new(),
            referenced_by: HashSet::new(),
            provenance: None,
        })
    }

    pub fn new_compiled(name: Option<&str>, body: CompiledBody) -> WordRef {
        let word = WordRef::wrap(WordData {
            name: name.map(|n| n.to_string()),
            immediate: false,
            private: false,
            vocabulary: None,
            kind: WordKind::Compiled(body),
            references: HashSet::new(),
            referenced_by: HashSet::new(),
            provenance: None,
        });
        word.reindex_references();
        word
    }

    pub fn borrow(&self) -> Ref<'_, WordData> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, WordData> {
        self.0.borrow_mut()
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    pub fn is_immediate(&self) -> bool {
        self.0.borrow().immediate
    }

    pub fn is_private(&self) -> bool {
        self.0.borrow().private
    }

    pub fn set_private(&self, private: bool) {
        self.0.borrow_mut().private = private;
    }

    pub fn set_provenance(&self, provenance: Provenance) {
        self.0.borrow_mut().provenance = Some(provenance);
    }

    /// Recompute `references` from the current compiled body (a no-op for primitives and
    /// variables) without touching `referenced_by` on the words it used to reference. Callers
    /// that replace a body wholesale should use `reference_graph::recompile` instead, which
    /// also maintains the inverse edges; this is for first construction only, when there are
    /// no stale edges to tear down.
    fn reindex_references(&self) {
        let refs = {
            let data = self.0.borrow();
            match &data.kind {
                WordKind::Compiled(body) => body_word_refs(body),
                _ => Vec::new(),
            }
        };

        for referenced in &refs {
            referenced.borrow_mut().referenced_by.insert(self.clone());
        }

        self.0.borrow_mut().references = refs.into_iter().collect();
    }

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

/// Collect every word directly named in a compiled body: both `Execute` entries and any
/// quotation captured as a `PushLiteral(Value::Word(_))`, including ones nested in array or
/// record literals.
pub fn body_word_refs(body: &CompiledBody) -> Vec<WordRef> {
    let mut refs = Vec::new();
    for item in body {
        match item {
            BodyItem::Execute(word) => refs.push(word.clone()),
            BodyItem::PushLiteral(value) => value.collect_word_refs(&mut refs),
        }
    }
    refs
}

impl PartialEq for WordRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for WordRef {}

impl std::hash::Hash for WordRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl Debug for WordRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Word({})", name),
            None => write!(f, "Word(<quotation @ {:#x}>)", self.identity()),
        }
    }
}
