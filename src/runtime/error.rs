use crate::lang::source_buffer::SourceLocation;
use crate::runtime::interpreter::CallStack;
use std::fmt::{self, Debug, Display, Formatter};
use std::process::{ExitCode, Termination};

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Any error that occurs during the execution of a Borth script.
///
/// This single struct covers every error kind (validation, arity/stack, type,
/// storage-at-the-boundary, user-raised `err`) rather than an enum-of-kinds — the kind
/// lives in the message, the struct carries the location and call stack needed to report
/// it usefully.
#[derive(Clone)]
pub struct ScriptError {
    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The script's call stack at the time of the error, if available.
    call_stack: Option<CallStack>,
}

impl std::error::Error for ScriptError {}

impl Termination for ScriptError {
    fn report(self) -> ExitCode {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.error)?,
            None => write!(f, "{}", self.error)?,
        }

        if let Some(call_stack) = &self.call_stack {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev() {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ScriptError {
    pub fn new(location: Option<SourceLocation>, error: String, call_stack: Option<CallStack>) -> ScriptError {
        ScriptError {
            location,
            error,
            call_stack,
        }
    }

    pub fn new_as_result<T>(
        location: Option<SourceLocation>,
        error: String,
        call_stack: Option<CallStack>,
    ) -> Result<T> {
        Err(ScriptError::new(location, error, call_stack))
    }

    pub fn location(&self) -> &Option<SourceLocation> {
        &self.location
    }

    pub fn message(&self) -> &String {
        &self.error
    }

    pub fn call_stack(&self) -> &Option<CallStack> {
        &self.call_stack
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        ScriptError::new(None, format!("I/O error: {}", error), None)
    }
}

impl From<crate::storage::StorageError> for ScriptError {
    fn from(error: crate::storage::StorageError) -> ScriptError {
        ScriptError::new(None, error.to_string(), None)
    }
}

/// A convenience function for creating a ScriptError and wrapping it in a Result::Err using the
/// runtime's current location and call stack.
pub fn script_error<T>(runtime: &crate::runtime::interpreter::Runtime, message: String) -> Result<T> {
    let location = runtime.current_location();
    let call_stack = runtime.call_stack();

    ScriptError::new_as_result(location, message, Some(call_stack))
}

pub fn script_error_str<T>(runtime: &crate::runtime::interpreter::Runtime, message: &str) -> Result<T> {
    script_error(runtime, message.to_string())
}

/// Internal control-flow signal distinguished from a real `ScriptError`. `Exit` is how the
/// `exit` word and the loop-iteration words (`times`, `each`, `map`, `filter`, `fold`)
/// communicate "stop iterating" back up to the nearest loop boundary without that unwind
/// being reported to the user as a failure.
#[derive(Clone)]
pub enum Signal {
    Error(ScriptError),
    Exit,
}

impl From<ScriptError> for Signal {
    fn from(error: ScriptError) -> Signal {
        Signal::Error(error)
    }
}

pub type SignalResult<T> = std::result::Result<T, Signal>;

/// Run a loop body, catching `Exit` at this boundary and turning it back into a clean `Ok(())`
/// while letting real errors propagate. Used by every iterating primitive.
pub fn catch_exit(result: SignalResult<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(Signal::Exit) => Ok(()),
        Err(Signal::Error(error)) => Err(error),
    }
}
