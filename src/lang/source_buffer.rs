impl Default for SourceLocation {
    fn default() -> Self {
        Self::new()
    }
}

use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

/// The location in the source code where a token was found.  This structure is used all over the
/// interpreter to keep track of where important things are found in the source code.  This is used
/// extensively in error reporting.
///
/// This is a read-only structure outside of the token stream.  Use the field accessor methods to
/// get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq)]
pub struct SourceLocation {
    /// Either the path to the file or a description of the source code.  For example code entered
    /// in the REPL will have a tag of "\<repl\>".
    path: String,

    /// The 1 based line number in the source code where the token was found.
    line: usize,

    /// The 1 based column number in the source code where the token was found.
    column: usize,
}

impl Hash for SourceLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}

/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}

impl SourceLocation {
    /// Create a new SourceLocation with default values.
    pub fn new() -> SourceLocation {
        SourceLocation {
            path: "unspecified".to_string(),
            line: 1,
            column: 1,
        }
    }

    /// Create a new SourceLocation with the path to the source code.
    pub fn new_from_path(path: &str) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line: 1,
            column: 1,
        }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line,
            column,
        }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Move the cursor onto a new line.  Only the token stream, which owns the cursor, should
    /// call this.
    pub(crate) fn advance_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Move the cursor one column forward.  Only the token stream, which owns the cursor, should
    /// call this.
    pub(crate) fn advance_column(&mut self) {
        self.column += 1;
    }
}

/// Helper macro to get the location of the macro invocation.  This is useful for error reporting
/// that includes locations within the Rust code where important operations are occurring.
#[macro_export]
macro_rules! location_here {
    () => {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(), line!() as usize, column!() as usize)
    };
}
