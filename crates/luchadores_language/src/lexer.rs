//! Lexer for the Luchadores DSL.
//!
//! The lexer converts source text into a stream of tokens. Reserved words
//! are recognized case-insensitively; identifiers keep their casing.
//! Unrecognized characters are recorded as [`LexicalError`]s and skipped,
//! so tokenization itself never fails.

use luchadores_foundation::LexicalError;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Accented letters accepted in identifiers besides ASCII letters and `_`.
const ACCENTED: &str = "áéíóúÁÉÍÓÚñÑ";

/// Lexer for Luchadores source code.
///
/// Iterating a lexer yields every token up to and including
/// [`TokenKind::Eof`], then stops. Cloning a fresh lexer restarts the scan.
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Characters skipped so far.
    errors: Vec<LexicalError>,
    /// Whether `Eof` has been handed out by the iterator.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Returns the lexical errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    /// Takes the lexical errors recorded so far, leaving none behind.
    pub fn take_errors(&mut self) -> Vec<LexicalError> {
        std::mem::take(&mut self.errors)
    }

    /// Returns the next token from the source.
    ///
    /// Once the input is exhausted every call returns [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_trivia();

            let start = self.position;
            let start_line = self.line;
            let start_column = self.column;

            let Some(c) = self.peek_char() else {
                return Token::new(
                    TokenKind::Eof,
                    Span::new(start, start, start_line, start_column),
                );
            };

            let kind = match c {
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                ';' => self.single(TokenKind::Semicolon),
                ':' => self.single(TokenKind::Colon),
                '.' => self.single(TokenKind::Dot),
                '<' => self.with_equals(TokenKind::LessEq, Some(TokenKind::Less)),
                '>' => self.with_equals(TokenKind::GreaterEq, Some(TokenKind::Greater)),
                '=' => self.with_equals(TokenKind::EqEq, Some(TokenKind::Assign)),
                '!' => self.with_equals(TokenKind::NotEq, None),
                c if c.is_ascii_digit() => Some(self.scan_number()),
                c if is_ident_start(c) => Some(self.scan_word()),
                _ => None,
            };

            match kind {
                Some(kind) => {
                    return Token::new(
                        kind,
                        Span::new(start, self.position, start_line, start_column),
                    );
                }
                None => {
                    self.advance();
                    let error = LexicalError::new(c, start_line, start_column);
                    tracing::warn!(
                        target: "luchadores::lexer",
                        character = %c,
                        line = start_line,
                        column = start_column,
                        "skipping unrecognized character"
                    );
                    self.errors.push(error);
                }
            }
        }
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character after the next one.
    fn peek_second(&self) -> Option<char> {
        self.rest.chars().nth(1)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and returns `kind`.
    #[allow(clippy::unnecessary_wraps)]
    fn single(&mut self, kind: TokenKind) -> Option<TokenKind> {
        self.advance();
        Some(kind)
    }

    /// Scans an operator that may be followed by `=`.
    ///
    /// The two-character form wins when present. Without it, `alone` is
    /// returned, or `None` if the first character cannot stand alone.
    fn with_equals(&mut self, paired: TokenKind, alone: Option<TokenKind>) -> Option<TokenKind> {
        if self.peek_second() == Some('=') {
            self.advance();
            self.advance();
            return Some(paired);
        }
        if alone.is_some() {
            self.advance();
        }
        alone
    }

    /// Skips ASCII blanks (space, tab, CR, LF) and `//` line comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.advance();
            } else if c == '/' && self.peek_second() == Some('/') {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Scans an unsigned integer literal.
    fn scan_number(&mut self) -> TokenKind {
        let mut value: u64 = 0;
        while let Some(c) = self.peek_char() {
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            value = value
                .saturating_mul(10)
                .saturating_add(u64::from(digit));
            self.advance();
        }
        TokenKind::Number(value)
    }

    /// Scans an identifier or reserved word.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        let word_start = self.rest;
        while let Some(c) = self.peek_char() {
            if is_ident_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &word_start[..self.position - start];
        TokenKind::keyword(&text.to_lowercase()).unwrap_or_else(|| TokenKind::Ident(text.into()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Returns true if `c` can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || ACCENTED.contains(c)
}

/// Returns true if `c` can appear in an identifier after the first char.
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
