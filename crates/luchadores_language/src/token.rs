//! Token types for the Luchadores DSL.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The type and literal value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the 1-based line this token starts on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.span.line
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// Token types for the Luchadores DSL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Declarations
    /// `luchador`
    Luchador,
    /// `stats`
    Stats,
    /// `acciones`
    Acciones,
    /// `golpe`
    Golpe,
    /// `patada`
    Patada,
    /// `bloqueo`
    Bloqueo,
    /// `combos`
    Combos,

    // Simulation block
    /// `simulacion`
    Simulacion,
    /// `config`
    Config,
    /// `luchadores`
    Luchadores,
    /// `inicia`
    Inicia,
    /// `turnos_max`
    TurnosMax,
    /// `pelea`
    Pelea,
    /// `turno`
    Turno,
    /// `vs`
    Vs,

    // Instructions
    /// `si` (also the affirmative value of `giratoria`)
    Si,
    /// `sino`
    Sino,
    /// `usa`
    Usa,
    /// `self`
    SelfKw,
    /// `oponente`
    Oponente,

    // Attributes and values
    /// `hp`
    Hp,
    /// `st`
    St,
    /// `st_req`
    StReq,
    /// `daño`
    Dano,
    /// `costo`
    Costo,
    /// `altura`
    Altura,
    /// `forma`
    Forma,
    /// `giratoria`
    Giratoria,
    /// `alta`
    Alta,
    /// `media`
    Media,
    /// `baja`
    Baja,
    /// `frontal`
    Frontal,
    /// `lateral`
    Lateral,
    /// `no`
    No,

    // Literals
    /// Identifier, original casing preserved
    Ident(String),
    /// Unsigned integer literal (saturates at `u64::MAX`)
    Number(u64),

    // Structural symbols
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `=`
    Assign,
    /// `.`
    Dot,

    // Relational operators
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,

    /// End of input
    Eof,
}

/// Reserved words, lowercase, paired with their token kinds.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("luchador", TokenKind::Luchador),
    ("stats", TokenKind::Stats),
    ("acciones", TokenKind::Acciones),
    ("golpe", TokenKind::Golpe),
    ("patada", TokenKind::Patada),
    ("bloqueo", TokenKind::Bloqueo),
    ("combos", TokenKind::Combos),
    ("simulacion", TokenKind::Simulacion),
    ("config", TokenKind::Config),
    ("luchadores", TokenKind::Luchadores),
    ("inicia", TokenKind::Inicia),
    ("turnos_max", TokenKind::TurnosMax),
    ("pelea", TokenKind::Pelea),
    ("turno", TokenKind::Turno),
    ("vs", TokenKind::Vs),
    ("si", TokenKind::Si),
    ("sino", TokenKind::Sino),
    ("usa", TokenKind::Usa),
    ("self", TokenKind::SelfKw),
    ("oponente", TokenKind::Oponente),
    ("hp", TokenKind::Hp),
    ("st", TokenKind::St),
    ("st_req", TokenKind::StReq),
    ("daño", TokenKind::Dano),
    ("costo", TokenKind::Costo),
    ("altura", TokenKind::Altura),
    ("forma", TokenKind::Forma),
    ("giratoria", TokenKind::Giratoria),
    ("alta", TokenKind::Alta),
    ("media", TokenKind::Media),
    ("baja", TokenKind::Baja),
    ("frontal", TokenKind::Frontal),
    ("lateral", TokenKind::Lateral),
    ("no", TokenKind::No),
];

impl TokenKind {
    /// Looks up a reserved word by its exact lowercase spelling.
    #[must_use]
    pub fn keyword(lowercase: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lowercase)
            .map(|(_, kind)| kind.clone())
    }

    /// Returns the reserved word for this kind, if it is one.
    #[must_use]
    pub fn keyword_text(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(word, _)| *word)
    }

    /// Returns true if this kind is a reserved word.
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }

    /// Returns true if this kind is one of the six relational operators.
    #[must_use]
    pub const fn is_relational(&self) -> bool {
        matches!(
            self,
            Self::Less | Self::Greater | Self::LessEq | Self::GreaterEq | Self::EqEq | Self::NotEq
        )
    }

    /// Returns a human-readable name for this token kind.
    ///
    /// Used in "expected X, found Y" messages, so payload-carrying kinds
    /// name their category rather than their value.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(word) = self.keyword_text() {
            return format!("'{word}'");
        }
        match self {
            Self::Ident(_) => "identifier".into(),
            Self::Number(_) => "integer".into(),
            Self::Eof => "end of input".into(),
            other => format!("'{}'", other.symbol()),
        }
    }

    /// Returns the source spelling of a symbol or operator kind.
    fn symbol(&self) -> &'static str {
        match self {
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Assign => "=",
            Self::Dot => ".",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            _ => "?",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::Number(n) => write!(f, "integer {n}"),
            other => f.write_str(&other.name()),
        }
    }
}
