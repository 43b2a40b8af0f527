//! Error types for the Luchadores system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Luchadores operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Lexical errors recorded before this error was raised.
    ///
    /// The lexer skips unrecognized characters instead of failing, so a
    /// syntax error is often the downstream symptom of one of these.
    pub lexical: Vec<LexicalError>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            lexical: Vec::new(),
        }
    }

    /// Attaches the lexical errors that preceded this error.
    #[must_use]
    pub fn with_lexical(mut self, lexical: Vec<LexicalError>) -> Self {
        self.lexical = lexical;
        self
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an unexpected end of input error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedEof {
            expected: expected.into(),
        })
    }

    /// Creates a semantic error.
    #[must_use]
    pub fn semantic(message: impl Into<String>, line: u32) -> Self {
        Self::new(ErrorKind::Semantic {
            message: message.into(),
            line,
        })
    }

    /// Creates an unknown fighter error.
    #[must_use]
    pub fn unknown_fighter(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFighter(name.into()))
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, source: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: source.to_string(),
        })
    }

    /// Returns the source line this error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match &self.kind {
            ErrorKind::Syntax { line, .. } | ErrorKind::Semantic { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The token stream does not match the grammar.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Description of the mismatch, naming the offending token.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Tokens ran out before the grammar was satisfied.
    #[error("syntax error: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for.
        expected: String,
    },

    /// The program is well-formed but inconsistent.
    #[error("semantic error at line {line}: {message}")]
    Semantic {
        /// Description of the inconsistency.
        message: String,
        /// Line of the offending declaration.
        line: u32,
    },

    /// A fighter referenced by the simulation is missing from the library.
    #[error("unknown fighter: {0}")]
    UnknownFighter(String),

    /// A source file could not be read.
    #[error("cannot read {path}: {message}")]
    Io {
        /// The path that failed.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// An unrecognized character skipped by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    /// The character that was skipped.
    pub character: char,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl LexicalError {
    /// Creates a new lexical error.
    #[must_use]
    pub const fn new(character: char, line: u32, column: u32) -> Self {
        Self {
            character,
            line,
            column,
        }
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized character {:?} at {}:{}",
            self.character, self.line, self.column
        )
    }
}

/// Result type alias for Luchadores operations.
pub type Result<T> = std::result::Result<T, Error>;
