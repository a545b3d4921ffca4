/// The `Value` enumeration: every runtime datum a compiled body or data stack can hold.
pub mod value;

/// The `Word` object: the unit of definition, identity, and dependency tracking.
pub mod word;

/// Vocabularies: named, orderable collections of words with import lists.
pub mod vocabulary;

/// The reference graph and the recompiler that keeps dependents in sync on redefinition.
pub mod reference_graph;
