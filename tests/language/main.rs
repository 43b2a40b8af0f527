//! Integration tests for Layer 1: Language
//!
//! Tests for tokenization, parsing, validation, and pretty-printing.

mod lexer;
mod parser;
