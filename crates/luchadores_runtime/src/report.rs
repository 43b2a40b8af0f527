//! Error reports for the console.

use std::fmt::Write as _;

use luchadores_foundation::{Error, ErrorKind};

/// Renders an error with its origin, the offending source line, and any
/// characters the lexer skipped before it.
///
/// ```text
/// pelea.txt:4:17: syntax error at 4:17: expected ';', found '}'
///    4 | turno Rex { usa jab }
///      |                 ^
/// note: unrecognized character '$' at 2:5
/// ```
#[must_use]
pub fn error_report(origin: &str, error: &Error) -> String {
    let mut out = match &error.kind {
        ErrorKind::Syntax {
            line,
            column,
            context,
            ..
        } => {
            let mut out = format!("{origin}:{line}:{column}: {error}");
            let gutter = line.to_string().len() + 2;
            let _ = write!(out, "\n{line:>gutter$} | {context}");
            let pad = (*column as usize).saturating_sub(1);
            let _ = write!(out, "\n{:gutter$} | {:pad$}^", "", "");
            out
        }
        ErrorKind::Semantic { line, .. } => format!("{origin}:{line}: {error}"),
        ErrorKind::Io { .. } => error.to_string(),
        _ => format!("{origin}: {error}"),
    };
    for lexical in &error.lexical {
        let _ = write!(out, "\nnote: {lexical}");
    }
    out
}
