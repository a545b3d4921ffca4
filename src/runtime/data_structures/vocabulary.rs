use crate::runtime::data_structures::reference_graph;
use crate::runtime::data_structures::word::WordRef;
use crate::runtime::interpreter::Runtime;
use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    rc::{Rc, Weak},
};

/// The data behind a `VocabularyRef`: a name, a flat table of the words it directly defines,
/// and the list of other vocabularies it imports. Reached only through the `Rc<RefCell<_>>`
/// handle so vocabularies, like words, compare by identity.
pub struct VocabularyData {
    pub name: String,
    words: HashMap<String, WordRef>,

    /// Imported vocabularies, in import order. Name resolution walks this from the back
    /// (last imported wins) after the current vocabulary comes up empty. This is the
    /// `dependencies` set of the dialect's data model; kept as an ordered `Vec` (not a set)
    /// because resolution order matters and re-imports are deduplicated at insertion.
    pub imports: Vec<VocabularyRef>,

    /// Vocabularies that import this one, the inverse of `imports`. Maintained only so that
    /// the relationship is visible from either side; name resolution never walks this list.
    pub dependents: Vec<VocabularyWeakRef>,
}

/// A reference-counted, identity-comparable handle to a vocabulary.
#[derive(Clone)]
pub struct VocabularyRef(Rc<RefCell<VocabularyData>>);

/// A non-owning handle, used for a word's back-reference to the vocabulary that holds it so
/// that vocabulary-to-word strong ownership doesn't become a cycle.
#[derive(Clone)]
pub struct VocabularyWeakRef(Weak<RefCell<VocabularyData>>);

impl VocabularyWeakRef {
    pub fn upgrade(&self) -> Option<VocabularyRef> {
        self.0.upgrade().map(VocabularyRef)
    }
}

impl VocabularyRef {
    pub fn new(name: &str) -> VocabularyRef {
        VocabularyRef(Rc::new(RefCell::new(VocabularyData {
            name: name.to_string(),
            words: HashMap::new(),
            imports: Vec::new(),
            dependents: Vec::new(),
        })))
    }

    pub fn downgrade(&self) -> VocabularyWeakRef {
        VocabularyWeakRef(Rc::downgrade(&self.0))
    }

    pub fn borrow(&self) -> Ref<'_, VocabularyData> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, VocabularyData> {
        self.0.borrow_mut()
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Look up a word defined directly in this vocabulary (not in anything it imports).
    /// Private words are only visible when `include_private` is set, which the runtime only
    /// does when resolving from inside this same vocabulary.
    pub fn lookup(&self, name: &str, include_private: bool) -> Option<WordRef> {
        let data = self.0.borrow();
        data.words
            .get(name)
            .filter(|word| include_private || !word.is_private())
            .cloned()
    }

    /// Add `vocabulary` to this vocabulary's import list, unless it's already there. The
    /// search order for resolution is last-imported-first, so a re-import is a no-op rather
    /// than bumping it to the front. Also records the inverse edge on `vocabulary` so that
    /// `vocabulary.dependents()` includes `self`.
    pub fn add_import(&self, vocabulary: VocabularyRef) {
        let already_present = {
            let data = self.0.borrow();
            data.imports.iter().any(|existing| existing == &vocabulary)
        };

        if already_present {
            return;
        }

        self.0.borrow_mut().imports.push(vocabulary.clone());
        vocabulary.0.borrow_mut().dependents.push(self.downgrade());
    }

    /// The vocabularies this one imports, in import order (last-imported shadows earlier
    /// ones during resolution).
    pub fn dependencies(&self) -> Vec<VocabularyRef> {
        self.0.borrow().imports.clone()
    }

    /// The vocabularies that import this one.
    pub fn dependents(&self) -> Vec<VocabularyRef> {
        self.0
            .borrow()
            .dependents
            .iter()
            .filter_map(VocabularyWeakRef::upgrade)
            .collect()
    }

    /// Install `word` under `name`, taking ownership of the name slot. If a word already
    /// lived at that name and anything still depends on it, that old word's dependents are
    /// recompiled against the new definition. Provenance on the *new* word is left to the
    /// caller: a fresh `define` stamps it, while a `rebind` (syn: redefinition etc.) that
    /// reuses provenance does not call this at all and instead mutates the body in place.
    pub fn define(&self, runtime: &Runtime, name: &str, word: WordRef) {
        word.borrow_mut().vocabulary = Some(self.downgrade());

        let previous = {
            let mut data = self.0.borrow_mut();
            data.words.insert(name.to_string(), word)
        };

        if let Some(previous) = previous {
            let dependents: Vec<WordRef> = previous.borrow().referenced_by.iter().cloned().collect();
            if !dependents.is_empty() {
                tracing::debug!(
                    vocabulary = %self.name(),
                    word = %name,
                    dependents = dependents.len(),
                    "redefinition triggering dependent recompilation"
                );
            }
            for dependent in dependents {
                reference_graph::recompile(runtime, &dependent);
            }
        }
    }

    /// All word names defined directly in this vocabulary, for `.w`-style introspection.
    /// Private words are included only when `include_private` is set.
    pub fn word_names(&self, include_private: bool) -> Vec<String> {
        let data = self.0.borrow();
        let mut names: Vec<String> = data
            .words
            .iter()
            .filter(|(_, word)| include_private || !word.is_private())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl PartialEq for VocabularyRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VocabularyRef {}

impl Debug for VocabularyRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Vocabulary({})", self.name())
    }
}
