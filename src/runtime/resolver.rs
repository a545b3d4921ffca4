use crate::runtime::data_structures::vocabulary::VocabularyRef;
use crate::runtime::error;
use crate::runtime::interpreter::Runtime;
use std::{
    cell::RefCell,
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
};

/// A factory that populates a fresh vocabulary. Takes the owning runtime (so it can define
/// words into the vocabulary it's building) and may itself suspend — fetching a vocabulary's
/// definition from card storage, for instance.
pub type VocabularyFactory = Rc<dyn Fn(Runtime) -> Pin<Box<dyn Future<Output = error::Result<VocabularyRef>>>>>;

struct ResolverState {
    cache: HashMap<String, VocabularyRef>,
    factories: HashMap<String, VocabularyFactory>,
}

/// A name-to-vocabulary cache backed by lazily-invoked factories. `using:` consults this only
/// after failing to find an already-loaded vocabulary by name; a resolver hit is for
/// vocabularies that exist but haven't been materialized into this runtime yet (for example,
/// one backed by a stored card).
#[derive(Clone)]
pub struct Resolver(Rc<RefCell<ResolverState>>);

impl Resolver {
    pub fn new() -> Resolver {
        Resolver(Rc::new(RefCell::new(ResolverState {
            cache: HashMap::new(),
            factories: HashMap::new(),
        })))
    }

    /// Register (or replace) the factory used to materialize `name` the first time it's
    /// resolved.
    pub fn register(&self, name: &str, factory: VocabularyFactory) {
        self.0.borrow_mut().factories.insert(name.to_string(), factory);
    }

    pub fn has_factory(&self, name: &str) -> bool {
        self.0.borrow().factories.contains_key(name)
    }

    /// Resolve `name`: return the cached vocabulary if one exists, otherwise invoke its
    /// registered factory, cache the result, and register it with the runtime so later
    /// lookups by name find it directly without going through the resolver again.
    pub async fn resolve(&self, runtime: &Runtime, name: &str) -> error::Result<VocabularyRef> {
        if let Some(cached) = self.0.borrow().cache.get(name).cloned() {
            tracing::debug!(vocabulary = %name, "resolver cache hit");
            return Ok(cached);
        }

        let factory = self.0.borrow().factories.get(name).cloned().ok_or_else(|| {
            crate::runtime::error::ScriptError::new(
                runtime.current_location(),
                format!("no vocabulary named '{}' is loaded or resolvable", name),
                Some(runtime.call_stack()),
            )
        })?;

        tracing::debug!(vocabulary = %name, "resolver cache miss, invoking factory");
        let vocabulary = factory(runtime.clone()).await?;
        self.0.borrow_mut().cache.insert(name.to_string(), vocabulary.clone());
        runtime.register_vocabulary(vocabulary.clone());
        Ok(vocabulary)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new()
    }
}
