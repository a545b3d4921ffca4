/// Core data structures shared by the interpreter: values, words, vocabularies, and the
/// reference graph that drives dependency-aware recompilation.
pub mod data_structures;

/// The built-in native words available to every new runtime.
pub mod built_ins;

/// Error reporting: `ScriptError` and the `Signal` control-flow wrapper around it.
pub mod error;

/// The `Runtime` type: mode machine, target stack, word resolution, and execution.
pub mod interpreter;

/// Asynchronous resolution and caching of `using:` vocabularies.
pub mod resolver;
