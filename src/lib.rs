//! Borth: a stack-based, dynamically extensible concatenative language runtime with a
//! two-level name resolution model and dependency-driven recompilation — when a word is
//! redefined, every live compiled definition that referenced the old binding is
//! transparently rebound to the new one.
//!
//! The crate is organized the way the interpreter itself is layered: [`lang`] turns source
//! text into tokens, [`runtime::data_structures`] holds the value/word/vocabulary model and
//! the reference graph, [`runtime::interpreter`] is the executor that drives them, and
//! [`runtime::built_ins`] is the primitive vocabulary installed into every fresh runtime.
//! [`storage`] is the append-only card store that supplies source text with a provenance
//! stamp carried into every definition made while running a card.

/// Source buffer and streaming tokenizer.
#[macro_use]
pub mod lang;

/// Process-wide timer registry scripts use for their own timing (`chron-start`,
/// `chron-elapsed-ms`, `chron-clear`, `chron-stop-all`).
pub mod chrons;

/// Core data structures, the executor, built-in words, and error types.
pub mod runtime;

/// Append-only versioned card storage backing `run_card`/`run_card_version`.
pub mod storage;

pub use runtime::error::{ScriptError, Signal, SignalResult};
pub use runtime::interpreter::Runtime;

use uuid::Uuid;

/// Build a fresh runtime: installs `core` with every built-in primitive, registers the
/// default vocabulary resolver, and leaves `current` unset. Mirrors the interpreter API's
/// `create_runtime()`.
pub fn create_runtime() -> Runtime {
    Runtime::new()
}

/// Fetch a card's current source and run it, stamping every word it defines with that
/// card's id and version. A thin convenience wrapper over [`Runtime::run_card_version_with_source`]
/// for callers that keep their store separate from the runtime (rather than attaching it
/// via [`Runtime::with_store`]).
pub async fn run_card(
    runtime: &Runtime,
    cards: &storage::Store,
    card_id: Uuid,
) -> runtime::error::Result<()> {
    let (version, source) = cards.latest_version_source(card_id)?;
    runtime.run_card_version_with_source(card_id, version, &source).await
}

/// Fetch one specific version of a card's source and run it, stamping provenance with that
/// version rather than whatever is current.
pub async fn run_card_version(
    runtime: &Runtime,
    cards: &storage::Store,
    card_id: Uuid,
    version: i64,
) -> runtime::error::Result<()> {
    let source = cards.version_source(card_id, version)?;
    runtime.run_card_version_with_source(card_id, version, &source).await
}
