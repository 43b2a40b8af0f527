//! Lexer, parser, validation, and pretty-printer for the Luchadores DSL.
//!
//! This crate provides:
//! - `Lexer` - Tokenization of Luchadores source
//! - `Parser` - Parsing tokens into a [`Program`]
//! - `validate` - Semantic checks and non-fatal warnings
//! - `pretty` - Printing a program back to canonical source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod builder;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;
pub mod validate;

pub use ast::{
    ActionKind, Attribute, AtomicAction, Combo, Condition, Fighter, FighterSummary, Height,
    Instruction, Program, ProgramSummary, RelOp, Shape, SimulationConfig, Subject, TurnScript,
};
pub use builder::{FighterBuilder, ProgramBuilder};
pub use lexer::Lexer;
use luchadores_foundation::{LexicalError, Result};
pub use parser::Parser;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use validate::Warning;

/// Parses a complete program.
///
/// Unrecognized characters are skipped; use [`parse_with_diagnostics`] to
/// see them when the parse succeeds.
///
/// # Errors
/// Returns a syntax or semantic error if the source is not a valid program.
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// A parsed program together with everything reported along the way.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// The program.
    pub program: Program,
    /// Characters the lexer skipped.
    pub lexical: Vec<LexicalError>,
    /// Non-fatal semantic findings.
    pub warnings: Vec<Warning>,
}

impl Parsed {
    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lexical.is_empty() && self.warnings.is_empty()
    }
}

/// Parses a program and collects lexical errors and validation warnings.
///
/// # Errors
/// Returns a syntax or semantic error if the source is not a valid program.
pub fn parse_with_diagnostics(source: &str) -> Result<Parsed> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program()?;
    let lexical = parser.lexical_errors().to_vec();
    for error in &lexical {
        tracing::warn!(target: "luchadores::lexer", %error, "skipped character");
    }
    let warnings = validate::check(&program);
    for warning in &warnings {
        tracing::warn!(target: "luchadores::validate", %warning, "program warning");
    }
    Ok(Parsed {
        program,
        lexical,
        warnings,
    })
}
