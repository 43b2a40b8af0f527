//! Integration tests for the lexer
//!
//! Tests tokenization of Luchadores source.

use luchadores_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// =============================================================================
// Words
// =============================================================================

#[test]
fn keywords_ignore_case() {
    assert_eq!(
        kinds("luchador LUCHADOR Luchador"),
        vec![
            TokenKind::Luchador,
            TokenKind::Luchador,
            TokenKind::Luchador,
            TokenKind::Eof
        ]
    );
}

#[test]
fn identifiers_keep_case() {
    assert_eq!(
        kinds("Rex rEX"),
        vec![
            TokenKind::Ident("Rex".into()),
            TokenKind::Ident("rEX".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn accented_identifiers() {
    assert_eq!(
        kinds("puño Ñandú _x9 daño"),
        vec![
            TokenKind::Ident("puño".into()),
            TokenKind::Ident("Ñandú".into()),
            TokenKind::Ident("_x9".into()),
            TokenKind::Dano,
            TokenKind::Eof
        ]
    );
}

#[test]
fn multiword_keywords() {
    assert_eq!(
        kinds("turnos_max st_req self oponente"),
        vec![
            TokenKind::TurnosMax,
            TokenKind::StReq,
            TokenKind::SelfKw,
            TokenKind::Oponente,
            TokenKind::Eof
        ]
    );
}

// =============================================================================
// Symbols and Numbers
// =============================================================================

#[test]
fn operators_are_greedy() {
    assert_eq!(
        kinds("< <= > >= == != ="),
        vec![
            TokenKind::Less,
            TokenKind::LessEq,
            TokenKind::Greater,
            TokenKind::GreaterEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::Assign,
            TokenKind::Eof
        ]
    );
}

#[test]
fn condition_tokens() {
    assert_eq!(
        kinds("self.hp<50"),
        vec![
            TokenKind::SelfKw,
            TokenKind::Dot,
            TokenKind::Hp,
            TokenKind::Less,
            TokenKind::Number(50),
            TokenKind::Eof
        ]
    );
}

#[test]
fn comments_and_lines() {
    let tokens = Lexer::tokenize_all("usa // a comment ; {\n  jab;");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].span.line, 1);
    assert_eq!(tokens[1].kind, TokenKind::Ident("jab".into()));
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
}

// =============================================================================
// Lexical Errors
// =============================================================================

#[test]
fn unknown_characters_are_skipped() {
    let mut lexer = Lexer::new("usa $ jab @;");
    let tokens: Vec<_> = lexer.by_ref().map(|t| t.kind).collect();
    assert_eq!(
        tokens,
        vec![
            TokenKind::Usa,
            TokenKind::Ident("jab".into()),
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    let errors = lexer.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!((errors[0].character, errors[0].column), ('$', 5));
    assert_eq!((errors[1].character, errors[1].column), ('@', 11));
}

#[test]
fn lone_bang_is_an_error() {
    let mut lexer = Lexer::new("! =");
    let tokens: Vec<_> = lexer.by_ref().map(|t| t.kind).collect();
    assert_eq!(tokens, vec![TokenKind::Assign, TokenKind::Eof]);
    assert_eq!(lexer.errors()[0].character, '!');
}
