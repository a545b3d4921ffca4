use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Instant};

/// A single named timer: when it was started, and the last duration it reported, in case a
/// script reads it after stopping without capturing the returned value.
#[derive(Clone, Copy)]
struct Chron {
    started: Instant,
}

/// A registry of named timers ("chrons"), cloned cheaply between every `Runtime` handle that
/// shares the same underlying state. Scripts use these for their own timing/benchmarking
/// (`chron-start`, `chron-elapsed-ms`, `chron-clear`, `chron-stop-all`) independent of the
/// runtime's own execution.
#[derive(Clone)]
pub struct ChronRegistry(Rc<RefCell<HashMap<String, Chron>>>);

impl ChronRegistry {
    pub fn new() -> ChronRegistry {
        ChronRegistry(Rc::new(RefCell::new(HashMap::new())))
    }

    /// (Re)start the named timer, overwriting any prior start time.
    pub fn start(&self, name: &str) {
        self.0.borrow_mut().insert(name.to_string(), Chron { started: Instant::now() });
    }

    /// Milliseconds elapsed since the named timer was started, or `None` if it was never
    /// started.
    pub fn elapsed_ms(&self, name: &str) -> Option<u128> {
        self.0.borrow().get(name).map(|chron| chron.started.elapsed().as_millis())
    }

    pub fn clear(&self, name: &str) {
        self.0.borrow_mut().remove(name);
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Idempotent teardown: drop every registered timer. Safe to call more than once, and
    /// safe to call on a registry with nothing running.
    pub fn stop_all(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Default for ChronRegistry {
    fn default() -> Self {
        ChronRegistry::new()
    }
}
