/// Module for managing the original source code and tracking cursor location within it.
pub mod source_buffer;

/// Module for pulling tokens out of the source buffer on demand.  Unlike a conventional
/// tokenizer this does not run ahead of the executor: tokens are produced one at a time so
/// that compile-time words can seize the stream and parse with their own delimiters (strings,
/// `syn:` bodies, etc), and so that `next` can reach back into a still-open stream.
pub mod token_stream;
