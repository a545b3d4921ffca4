use crate::chrons::ChronRegistry;
use crate::lang::source_buffer::SourceLocation;
use crate::lang::token_stream::{Token, TokenStream};
use crate::runtime::built_ins;
use crate::runtime::data_structures::value::Value;
use crate::runtime::data_structures::vocabulary::VocabularyRef;
use crate::runtime::data_structures::word::{BodyItem, CompiledBody, PrimitiveFn, Provenance, WordKind, WordRef};
use crate::runtime::error::{self, catch_exit, script_error_str, ScriptError, Signal, SignalResult};
use crate::runtime::interpreter::{CallItem, CallStack, Mode, ROOT_VOCABULARY};
use crate::runtime::resolver::Resolver;
use crate::storage::Store;
use std::{
    cell::RefCell,
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

/// What a target on the target stack is accumulating into.
pub enum Target {
    /// An ordinary value stack. `targets[0]` is always one of these: the base interpretation
    /// stream that the rest of the script reads and writes when nothing has redirected it.
    Values(Vec<Value>),

    /// A compiled body under construction, either for a named definition (`:`) or an
    /// anonymous quotation (`[`). Distinguished so the word that closes it (`;` vs `]`) knows
    /// whether to install the result into the current vocabulary or push it as a value.
    Compiling { body: CompiledBody, kind: CompileKind },
}

#[derive(Clone)]
pub enum CompileKind {
    Definition { name: String, immediate: bool, private: bool },
    Quotation,
}

/// Everything a newly started script is stamped with when it's being defined as part of
/// running a stored card, so that the words it defines carry the card's provenance. `None`
/// outside of `run_card`/`run_card_version`.
#[derive(Clone)]
struct ProvenanceContext {
    card_id: Uuid,
    version: i64,
}

struct RuntimeState {
    /// Every vocabulary ever loaded into this runtime, in load order. Position 0 is always
    /// `core`. This doubles as the runtime's name-resolution fallback list: `find` walks it
    /// from the back after `current` comes up empty, so any vocabulary loaded here (via
    /// `using:` or simply by having been created) is visible everywhere, not just to
    /// whoever imported it.
    vocabularies: Vec<VocabularyRef>,

    /// The destination of new definitions. `None` until a script issues `in:`; forbidden to
    /// ever be `core` itself.
    current: Option<VocabularyRef>,
    targets: Vec<Target>,
    call_stack: CallStack,
    current_location: Option<SourceLocation>,
    token_stream: Option<TokenStream>,
    unbound_word_as_string: bool,
    options: HashMap<String, String>,
    store: Option<Arc<Store>>,
    chrons: ChronRegistry,
    resolver: Resolver,
    provenance: Option<ProvenanceContext>,
    stack_max_depth: usize,

    /// The most recently installed word, for the post-hoc `immediate` marker (`: foo ... ;
    /// immediate`, as an alternative to `syn:`). `None` until the first `define`.
    last_defined: Option<WordRef>,
}

/// A handle to a running interpreter. Cheap to clone — every clone shares the same
/// underlying state — which is what lets a native word's `async fn` hold onto its runtime
/// across an `.await` instead of trying to carry a borrow through suspension.
#[derive(Clone)]
pub struct Runtime(Rc<RefCell<RuntimeState>>);

impl Runtime {
    /// Build a fresh runtime with the root `forth` vocabulary and every built-in primitive
    /// installed, and no card storage attached.
    pub fn new() -> Runtime {
        let root = VocabularyRef::new(ROOT_VOCABULARY);
        let runtime = Runtime(Rc::new(RefCell::new(RuntimeState {
            vocabularies: vec![root],
            current: None,
            targets: vec![Target::Values(Vec::new())],
            call_stack: Vec::new(),
            current_location: None,
            token_stream: None,
            unbound_word_as_string: false,
            options: HashMap::new(),
            store: None,
            chrons: ChronRegistry::new(),
            resolver: Resolver::new(),
            provenance: None,
            stack_max_depth: 0,
            last_defined: None,
        })));

        built_ins::install(&runtime);
        runtime
    }

    /// Attach card storage, enabling `run_card`/`run_card_version` and the storage-backed
    /// vocabulary words.
    pub fn with_store(store: Arc<Store>) -> Runtime {
        let runtime = Runtime::new();
        runtime.0.borrow_mut().store = Some(store);
        runtime
    }

    pub fn store(&self) -> Option<Arc<Store>> {
        self.0.borrow().store.clone()
    }

    pub fn chrons(&self) -> ChronRegistry {
        self.0.borrow().chrons.clone()
    }

    pub fn resolver(&self) -> Resolver {
        self.0.borrow().resolver.clone()
    }

    pub fn set_option(&self, key: &str, value: &str) {
        if key == "unbound-word-as-string" {
            self.0.borrow_mut().unbound_word_as_string = value == "true";
        }
        self.0.borrow_mut().options.insert(key.to_string(), value.to_string());
    }

    pub fn option(&self, key: &str) -> Option<String> {
        self.0.borrow().options.get(key).cloned()
    }

    /// Delete an option entirely, as opposed to `set_option` with some sentinel value. This
    /// is what `opt: key nil` drives.
    pub fn remove_option(&self, key: &str) {
        self.0.borrow_mut().options.remove(key);
    }

    pub fn current_location(&self) -> Option<SourceLocation> {
        self.0.borrow().current_location.clone()
    }

    pub fn call_stack(&self) -> CallStack {
        self.0.borrow().call_stack.clone()
    }

    pub fn call_stack_push(&self, word: String, location: SourceLocation) {
        self.0.borrow_mut().call_stack.push(CallItem::new(word, location));
    }

    pub fn call_stack_pop(&self) {
        self.0.borrow_mut().call_stack.pop();
    }

    pub fn stack_max_depth(&self) -> usize {
        self.0.borrow().stack_max_depth
    }

    // -- vocabularies --------------------------------------------------------------------

    /// The always-present, never-removed, never-mutated-after-init vocabulary at
    /// `vocabularies[0]`. Holds every built-in primitive.
    pub fn core_vocabulary(&self) -> VocabularyRef {
        self.0.borrow().vocabularies[0].clone()
    }

    /// The vocabulary new definitions go into, or `None` if no `in:` has run yet.
    pub fn current_vocabulary(&self) -> Option<VocabularyRef> {
        self.0.borrow().current.clone()
    }

    /// Switch `current`. Rejects `core`: the core vocabulary is populated once at startup
    /// and is never a valid target for script-level definitions.
    pub fn set_current_vocabulary(&self, vocabulary: VocabularyRef) -> error::Result<()> {
        if vocabulary == self.core_vocabulary() {
            return ScriptError::new_as_result(
                self.current_location(),
                "cannot modify core vocabulary".to_string(),
                Some(self.call_stack()),
            );
        }

        self.0.borrow_mut().current = Some(vocabulary);
        Ok(())
    }

    /// Register a vocabulary with the runtime so it shows up in `all_words` and in the
    /// global resolution fallback list. Creating a `VocabularyRef` directly does not do
    /// this; only the resolver and `in:`'s vocabulary-creation path should call it.
    pub fn register_vocabulary(&self, vocabulary: VocabularyRef) {
        self.0.borrow_mut().vocabularies.push(vocabulary);
    }

    pub fn vocabularies(&self) -> Vec<VocabularyRef> {
        self.0.borrow().vocabularies.clone()
    }

    pub fn find_vocabulary(&self, name: &str) -> Option<VocabularyRef> {
        self.0
            .borrow()
            .vocabularies
            .iter()
            .find(|vocabulary| vocabulary.name() == name)
            .cloned()
    }

    /// A flattened, name-sorted snapshot of every word visible from here: every loaded
    /// vocabulary's public words, in load order, with `current`'s words (private included)
    /// shadowing same-named entries from earlier vocabularies. Mirrors the precedence
    /// `dispatch_word` itself uses, just computed eagerly instead of short-circuiting on
    /// first match, so `.w`/`words` can show the whole picture at once.
    pub fn all_words(&self) -> AllWords {
        let mut words = HashMap::new();

        for vocabulary in self.vocabularies() {
            for name in vocabulary.word_names(false) {
                if let Some(word) = vocabulary.lookup(&name, false) {
                    words.insert(name, word);
                }
            }
        }

        if let Some(current) = self.current_vocabulary() {
            for name in current.word_names(true) {
                if let Some(word) = current.lookup(&name, true) {
                    words.insert(name, word);
                }
            }
        }

        let mut entries: Vec<WordRef> = words.into_values().collect();
        entries.sort_by_key(|word| word.name().unwrap_or_default());
        AllWords(entries)
    }

    /// Runtime-level name resolution: `current` first (its own words, private included),
    /// then every loaded vocabulary (`vocabularies`, which always contains `core` at index
    /// 0) from most-recently-loaded to least, public words only. A name thus becomes
    /// visible everywhere the moment its vocabulary is loaded, not only to whoever ran
    /// `using:` on it — `using:`'s dependency/dependent bookkeeping is a separate,
    /// informational edge (see `Vocabulary::add_import`), not what resolution walks.
    pub fn find(&self, name: &str) -> Option<WordRef> {
        if let Some(current) = self.current_vocabulary() {
            if let Some(word) = current.lookup(name, true) {
                return Some(word);
            }
        }

        let vocabularies = self.vocabularies();
        for vocabulary in vocabularies.iter().rev() {
            if let Some(word) = vocabulary.lookup(name, false) {
                return Some(word);
            }
        }

        None
    }

    /// Define `word` under `name` in the current vocabulary, stamping provenance if this
    /// runtime is currently executing a card. Fails if no `in:` has run yet.
    pub fn define(&self, name: &str, word: WordRef) -> error::Result<()> {
        let Some(current) = self.current_vocabulary() else {
            return script_error_str(self, "requires current vocabulary");
        };

        let context = self.0.borrow().provenance.clone();
        if let Some(context) = context {
            word.set_provenance(Provenance {
                card_id: context.card_id,
                version: context.version,
                defined_at: chrono::Utc::now(),
            });
        }

        current.define(self, name, word.clone());
        self.0.borrow_mut().last_defined = Some(word);
        Ok(())
    }

    /// The word most recently installed by `define`, for `immediate` to mark after the fact.
    pub fn last_defined(&self) -> Option<WordRef> {
        self.0.borrow().last_defined.clone()
    }

    /// Host embedding entry point: install a native word directly into `core`, bypassing
    /// both script syntax and the `current`-vocabulary restriction — this is how the
    /// runtime's own built-in primitives get installed before any script has run `in:`.
    pub fn expose(&self, name: &str, signature: &str, description: &str, function: PrimitiveFn) {
        self.expose_word(name, false, signature, description, function);
    }

    /// Like `expose`, but for the handful of primitives (`:`, `;`, `[`, `]`, `in:`,
    /// `using:`, ...) that must run at compile time instead of being appended to the body
    /// under construction.
    pub fn expose_immediate(&self, name: &str, signature: &str, description: &str, function: PrimitiveFn) {
        self.expose_word(name, true, signature, description, function);
    }

    fn expose_word(&self, name: &str, immediate: bool, signature: &str, description: &str, function: PrimitiveFn) {
        let word = WordRef::new_primitive(name, immediate, signature, description, function);
        self.core_vocabulary().define(self, name, word);
    }

    // -- target stack ---------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        match self.0.borrow().targets.last() {
            Some(Target::Compiling { .. }) => Mode::Compile,
            _ => Mode::Interpret,
        }
    }

    pub fn push_target(&self, target: Target) {
        self.0.borrow_mut().targets.push(target);
    }

    /// Pop the top target. Fails if it's the only one left: the base interpretation stream
    /// can be redirected into but never removed.
    pub fn pop_target(&self) -> error::Result<Target> {
        let mut state = self.0.borrow_mut();
        if state.targets.len() <= 1 {
            return ScriptError::new_as_result(
                state.current_location.clone(),
                "cannot pop base target".to_string(),
                Some(state.call_stack.clone()),
            );
        }
        Ok(state.targets.pop().expect("checked non-empty above"))
    }

    pub fn push(&self, value: Value) -> error::Result<()> {
        let mut state = self.0.borrow_mut();
        match state.targets.last_mut() {
            Some(Target::Values(stack)) => {
                stack.push(value);
                state.stack_max_depth = state.stack_max_depth.max(stack.len());
                Ok(())
            }
            _ => {
                drop(state);
                script_error_str(self, "cannot push a value while compiling")
            }
        }
    }

    pub fn pop(&self) -> error::Result<Value> {
        let mut state = self.0.borrow_mut();
        match state.targets.last_mut() {
            Some(Target::Values(stack)) => match stack.pop() {
                Some(value) => Ok(value),
                None => {
                    let location = state.current_location.clone();
                    let call_stack = state.call_stack.clone();
                    drop(state);
                    ScriptError::new_as_result(location, "stack underflow".to_string(), Some(call_stack))
                }
            },
            _ => {
                drop(state);
                script_error_str(self, "cannot pop a value while compiling")
            }
        }
    }

    pub fn pop_as_int(&self) -> error::Result<i64> {
        match self.pop()? {
            Value::Int(value) => Ok(value),
            Value::Float(value) => Ok(value as i64),
            other => script_error_str(self, &format!("expected an int, found a {}", other.type_name())),
        }
    }

    pub fn pop_as_usize(&self) -> error::Result<usize> {
        let value = self.pop_as_int()?;
        usize::try_from(value).map_err(|_| {
            ScriptError::new(self.current_location(), format!("expected a non-negative index, found {}", value), Some(self.call_stack()))
        })
    }

    pub fn pop_as_float(&self) -> error::Result<f64> {
        match self.pop()? {
            Value::Int(value) => Ok(value as f64),
            Value::Float(value) => Ok(value),
            other => script_error_str(self, &format!("expected a float, found a {}", other.type_name())),
        }
    }

    pub fn pop_as_bool(&self) -> error::Result<bool> {
        Ok(self.pop()?.is_truthy())
    }

    pub fn pop_as_string(&self) -> error::Result<String> {
        match self.pop()? {
            Value::String(value) => Ok(value),
            other => script_error_str(self, &format!("expected a string, found a {}", other.type_name())),
        }
    }

    pub fn pop_as_word(&self) -> error::Result<WordRef> {
        match self.pop()? {
            Value::Word(word) => Ok(word),
            other => script_error_str(self, &format!("expected a word or quotation, found a {}", other.type_name())),
        }
    }

    /// Append an item to the compiled body currently under construction. Fails outside of
    /// compile mode.
    pub fn append_to_body(&self, item: BodyItem) -> error::Result<()> {
        let mut state = self.0.borrow_mut();
        match state.targets.last_mut() {
            Some(Target::Compiling { body, .. }) => {
                body.push(item);
                Ok(())
            }
            _ => {
                drop(state);
                script_error_str(self, "not compiling")
            }
        }
    }

    pub fn begin_compiling(&self, kind: CompileKind) {
        self.push_target(Target::Compiling { body: Vec::new(), kind });
    }

    /// Close the compiled body under construction, installing it as a named word or pushing
    /// it as a quotation value depending on how it was opened.
    pub fn end_compiling(&self) -> error::Result<()> {
        let target = self.pop_target()?;
        let Target::Compiling { body, kind } = target else {
            return script_error_str(self, "not compiling");
        };

        match kind {
            CompileKind::Definition { name, immediate, private } => {
                let word = WordRef::new_compiled(Some(&name), body);
                word.borrow_mut().immediate = immediate;
                word.borrow_mut().private = private;
                self.define(&name, word)?;
            }
            CompileKind::Quotation => {
                let word = WordRef::new_compiled(None, body);
                self.push(Value::Word(word))?;
            }
        }

        Ok(())
    }

    // -- variables --------------------------------------------------------------------------

    pub fn read_variable(&self, word: &WordRef) -> Value {
        match &word.borrow().kind {
            WordKind::Variable(value) => value.clone(),
            _ => Value::None,
        }
    }

    pub fn write_variable(&self, word: &WordRef, value: Value) -> error::Result<()> {
        match &mut word.borrow_mut().kind {
            WordKind::Variable(slot) => {
                *slot = value;
                Ok(())
            }
            _ => script_error_str(self, "not a variable"),
        }
    }

    // -- execution ----------------------------------------------------------------------

    /// Execute a single word, dispatching on what kind of word it is. Boxed because a
    /// compiled word's body may itself execute other compiled words, and an `async fn`
    /// cannot directly recurse into its own future type.
    pub fn execute_word(&self, word: WordRef) -> Pin<Box<dyn Future<Output = SignalResult<()>> + '_>> {
        Box::pin(async move {
            let name = word.name().unwrap_or_else(|| "<quotation>".to_string());
            let location = self.current_location().unwrap_or_default();
            self.call_stack_push(name, location);

            let kind_snapshot = {
                let data = word.borrow();
                match &data.kind {
                    WordKind::Primitive { function, .. } => ExecuteKind::Primitive(function.clone()),
                    WordKind::Variable(value) => ExecuteKind::Variable(value.clone()),
                    WordKind::Compiled(body) => ExecuteKind::Compiled(body.clone()),
                }
            };

            let result = match kind_snapshot {
                ExecuteKind::Primitive(function) => (function)(self.clone()).await,
                ExecuteKind::Variable(value) => self.push(value).map_err(Signal::from),
                ExecuteKind::Compiled(body) => self.execute_body(&body).await,
            };

            self.call_stack_pop();
            result
        })
    }

    pub fn execute_body(&self, body: &CompiledBody) -> Pin<Box<dyn Future<Output = SignalResult<()>> + '_>> {
        let body = body.clone();
        Box::pin(async move {
            for item in body {
                match item {
                    BodyItem::Execute(word) => self.execute_word(word).await?,
                    BodyItem::PushLiteral(value) => self.push(value).map_err(Signal::from)?,
                }
            }
            Ok(())
        })
    }

    /// Execute a word by name, looked up in the current vocabulary's resolution order. Used
    /// by the top-level run loop and by primitives (`call`) that execute a name off the
    /// stack.
    pub async fn execute_named(&self, name: &str) -> SignalResult<()> {
        match self.find(name) {
            Some(word) => self.execute_word(word).await,
            None if self.0.borrow().unbound_word_as_string => {
                self.push(Value::String(name.to_string())).map_err(Signal::from)
            }
            None => Err(Signal::Error(ScriptError::new(
                self.current_location(),
                format!("unknown word: {}", name),
                Some(self.call_stack()),
            ))),
        }
    }

    /// Replace the runtime's token stream and drive it to completion: each token is either
    /// executed (interpret mode) or appended to the body under construction (compile mode),
    /// except for immediate words, which always run right away so they can manipulate the
    /// target stack and pull further tokens for themselves (`:`, `"`, `in:`, ...).
    pub async fn run(&self, path: &str, source: &str) -> error::Result<()> {
        self.0.borrow_mut().token_stream = Some(TokenStream::new(path, source));
        catch_exit(self.run_loop().await)
    }

    async fn run_loop(&self) -> SignalResult<()> {
        loop {
            let token = {
                let mut state = self.0.borrow_mut();
                let stream = state
                    .token_stream
                    .as_mut()
                    .expect("run_loop only called with a token stream installed");
                let token = stream.next_token().map_err(Signal::from)?;
                if let Some(token) = &token {
                    state.current_location = Some(token.location().clone());
                }
                token
            };

            let Some(token) = token else {
                return Ok(());
            };

            self.step(token).await?;
        }
    }

    /// Run one already-read token through the same interpret/compile routing the main loop
    /// uses. Exposed (beyond the run loop itself) for the `next` primitive, which pulls one
    /// more token off the live stream mid-execution and executes it in whatever mode is
    /// current right now.
    pub(crate) async fn step(&self, token: Token) -> SignalResult<()> {
        match token {
            Token::Number(_, number) => {
                let value = match number {
                    crate::lang::token_stream::NumberType::Int(n) => Value::Int(n),
                    crate::lang::token_stream::NumberType::Float(n) => Value::Float(n),
                };
                self.dispatch_literal(value)
            }
            Token::String(_, text) => self.dispatch_literal(Value::String(text)),
            Token::Word(_, name) => {
                match self.find(&name) {
                    Some(word) if word.is_immediate() => self.execute_word(word).await,
                    Some(word) => self.dispatch_word(word).await,
                    None if self.0.borrow().unbound_word_as_string => self.dispatch_literal(Value::String(name)),
                    None => Err(Signal::Error(ScriptError::new(
                        self.current_location(),
                        format!("unknown word: {}", name),
                        Some(self.call_stack()),
                    ))),
                }
            }
        }
    }

    /// Route a literal: push it in interpret mode, append it in compile mode.
    fn dispatch_literal(&self, value: Value) -> SignalResult<()> {
        match self.mode() {
            Mode::Interpret => self.push(value).map_err(Signal::from),
            Mode::Compile => self.append_to_body(BodyItem::PushLiteral(value)).map_err(Signal::from),
        }
    }

    /// Public face of `dispatch_literal`, for primitives (`'`, `""`) that parse their own
    /// literal out of the raw input rather than getting one handed to them by the tokenizer.
    pub fn literal(&self, value: Value) -> SignalResult<()> {
        self.dispatch_literal(value)
    }

    /// Consume characters up to the next `terminator`, for `(` ... `)` comments, which parse
    /// with their own delimiter the same way `"` does for strings.
    pub fn parse_until(&self, terminator: char) -> error::Result<String> {
        let mut state = self.0.borrow_mut();
        let stream = state
            .token_stream
            .as_mut()
            .ok_or_else(|| ScriptError::new(None, "no active token stream".to_string(), None))?;
        stream.parse_until(terminator)
    }

    /// Route a non-immediate word: it only actually runs in interpret mode; in compile mode
    /// it is instead recorded for later.
    fn dispatch_word(&self, word: WordRef) -> Pin<Box<dyn Future<Output = SignalResult<()>> + '_>> {
        Box::pin(async move {
            match self.mode() {
                Mode::Interpret => self.execute_word(word).await,
                Mode::Compile => self.append_to_body(BodyItem::Execute(word)).map_err(Signal::from),
            }
        })
    }

    pub fn next_token(&self) -> error::Result<Option<Token>> {
        let mut state = self.0.borrow_mut();
        let stream = state
            .token_stream
            .as_mut()
            .ok_or_else(|| ScriptError::new(None, "no active token stream".to_string(), None))?;
        stream.next_token()
    }

    pub fn next_raw_word(&self) -> error::Result<Option<(SourceLocation, String)>> {
        let mut state = self.0.borrow_mut();
        let stream = state
            .token_stream
            .as_mut()
            .ok_or_else(|| ScriptError::new(None, "no active token stream".to_string(), None))?;
        stream.next_raw_word()
    }

    /// Implements the `next` primitive: pull one more token off the still-open input and run
    /// it through the same interpret/compile routing as the main loop, in whatever mode is
    /// current at the moment `next` itself runs. A no-op at end of input rather than an
    /// error, since "nothing left to meta-program with" isn't a failure.
    pub async fn execute_next_token(&self) -> SignalResult<()> {
        let token = self.next_token().map_err(Signal::from)?;
        if let Some(token) = token {
            self.current_location_set(token.location().clone());
            self.step(token).await?;
        }
        Ok(())
    }

    fn current_location_set(&self, location: SourceLocation) {
        self.0.borrow_mut().current_location = Some(location);
    }

    /// Run a card's newest version, stamping every word it defines with that card's
    /// provenance.
    pub async fn run_card(&self, card_id: Uuid) -> error::Result<()> {
        let store = self
            .store()
            .ok_or_else(|| ScriptError::new(None, "no card storage attached to this runtime".to_string(), None))?;
        let (version, source) = {
            let store = store.clone();
            tokio::task::spawn_blocking(move || store.latest_version_source(card_id))
                .await
                .map_err(|error| ScriptError::new(None, format!("card read panicked: {}", error), None))??
        };
        self.run_card_version_with_source(card_id, version, &source).await
    }

    pub async fn run_card_version(&self, card_id: Uuid, version: i64) -> error::Result<()> {
        let store = self
            .store()
            .ok_or_else(|| ScriptError::new(None, "no card storage attached to this runtime".to_string(), None))?;
        let source = {
            let store = store.clone();
            tokio::task::spawn_blocking(move || store.version_source(card_id, version))
                .await
                .map_err(|error| ScriptError::new(None, format!("card read panicked: {}", error), None))??
        };
        self.run_card_version_with_source(card_id, version, &source).await
    }

    pub(crate) async fn run_card_version_with_source(&self, card_id: Uuid, version: i64, source: &str) -> error::Result<()> {
        let previous = self.0.borrow().provenance.clone();
        self.0.borrow_mut().provenance = Some(ProvenanceContext { card_id, version });
        let label = format!("card:{}@{}", card_id, version);
        let result = self.run(&label, source).await;
        self.0.borrow_mut().provenance = previous;
        result
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

enum ExecuteKind {
    Primitive(PrimitiveFn),
    Variable(Value),
    Compiled(CompiledBody),
}

/// The result of [`Runtime::all_words`]: a name-sorted table suitable for printing from the
/// `words` primitive. Kept as its own type rather than a bare `Vec<WordRef>` so the table
/// layout lives in one `Display` impl instead of being reimplemented at every call site.
pub struct AllWords(Vec<WordRef>);

impl std::fmt::Display for AllWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for word in &self.0 {
            let name = word.name().unwrap_or_else(|| "<quotation>".to_string());
            let marker = if word.is_immediate() { "*" } else { " " };
            let description = match &word.borrow().kind {
                WordKind::Primitive { description, .. } => description.clone(),
                WordKind::Variable(_) => "variable".to_string(),
                WordKind::Compiled(_) => String::new(),
            };
            writeln!(f, "{}{:<16} {}", marker, name, description)?;
        }
        Ok(())
    }
}
