//! Core error types for Luchadores.
//!
//! This crate provides:
//! - [`Error`] - The error type returned by every fallible operation
//! - [`ErrorKind`] - Categorized error kinds for pattern matching
//! - [`LexicalError`] - Non-fatal diagnostics recorded by the lexer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorKind, LexicalError, Result};
