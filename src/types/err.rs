/*!
Error types used in the library.

- Parse errors abort a read, and the formula being read is discarded.
- Write errors leave any existing file untouched.
- Mismatches between a DIMACS header and the stream which follows it are *not* errors --- the reader warns and continues.

Names of the error enums overlap with corresponding areas of the library, and so throughout the library `err::{self}` is used to prefix uses of the types with `err::`.
*/

use std::path::PathBuf;

/// A union of the varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error related to parsing.
    Parse(ParseError),

    /// An error related to writing a formula.
    Write(WriteError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Write(e) => write!(f, "{e}"),
        }
    }
}

/// Errors while reading a DIMACS formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// No file at the given path.
    NoFile(PathBuf),

    /// The file could not be opened or read.
    Unreadable(PathBuf),

    /// The problem line of the input is missing or malformed.
    ProblemSpecification,

    /// A second problem line, at the given line of the input.
    DuplicateProblem(usize),

    /// An unreadable literal token, at the given line of the input.
    Literal(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFile(path) => write!(f, "File {} doesn't exist", path.display()),
            Self::Unreadable(path) => write!(f, "File {} couldn't be opened", path.display()),
            Self::ProblemSpecification => write!(f, "Missing or malformed problem line"),
            Self::DuplicateProblem(line) => write!(f, "Multiple problem lines, second at line {line}"),
            Self::Literal(line) => write!(f, "Unreadable literal at line {line}"),
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors while writing a formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WriteError {
    /// The path exists and overwriting was not forced.
    Exists(PathBuf),

    /// The file could not be created or written.
    Create(PathBuf),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exists(path) => {
                write!(f, "File {} already exists, use -f to force override", path.display())
            }
            Self::Create(path) => write!(f, "Couldn't create file {}", path.display()),
        }
    }
}

impl From<WriteError> for ErrorKind {
    fn from(e: WriteError) -> Self {
        ErrorKind::Write(e)
    }
}
