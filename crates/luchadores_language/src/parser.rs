//! Parser for the Luchadores DSL.
//!
//! A hand-written recursive-descent parser. Each grammar production is a
//! method that returns the node it built; insertion into the fighter
//! library happens once, in [`Parser::parse_program`], through a
//! [`ProgramBuilder`].
//!
//! ```text
//! program    := definition+ simulation
//! definition := "luchador" ID "{" stats actions combos "}"
//! simulation := "simulacion" "{" config fight "}"
//! ```

use luchadores_foundation::{Error, LexicalError, Result};

use crate::ast::{
    ActionKind, Attribute, AtomicAction, Combo, Condition, Fighter, Height, Instruction, Program,
    RelOp, Shape, SimulationConfig, Subject, TurnScript,
};
use crate::builder::{FighterBuilder, ProgramBuilder};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Maximum nesting of `si` blocks.
const MAX_NESTING: usize = 128;

/// Parser for Luchadores source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
    /// Current `si` nesting depth.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            depth: 0,
        }
    }

    /// Returns the lexical errors recorded so far.
    #[must_use]
    pub fn lexical_errors(&self) -> &[LexicalError] {
        self.lexer.errors()
    }

    /// Parses a complete program.
    ///
    /// # Errors
    /// Returns a syntax error if the tokens do not match the grammar, or a
    /// semantic error if names collide or the configuration is inconsistent.
    /// Lexical errors recorded before the failure are attached to it.
    pub fn parse_program(&mut self) -> Result<Program> {
        self.program()
            .map_err(|err| err.with_lexical(self.lexer.errors().to_vec()))
    }

    fn program(&mut self) -> Result<Program> {
        let mut library = ProgramBuilder::new();
        loop {
            library.add_fighter(self.parse_definition()?)?;
            if !self.at(&TokenKind::Luchador) {
                break;
            }
        }

        let (config, scripts) = self.parse_simulation()?;
        if !self.at(&TokenKind::Eof) {
            return Err(self.error_expected("end of input"));
        }

        library.build(config, scripts)
    }

    // -------------------------------------------------------------------------
    // Fighter definitions
    // -------------------------------------------------------------------------

    /// `"luchador" ID "{" stats actions combos "}"`
    fn parse_definition(&mut self) -> Result<Fighter> {
        self.expect(&TokenKind::Luchador)?;
        let (name, span) = self.expect_ident("fighter name")?;
        self.expect(&TokenKind::LBrace)?;

        let (hp, stamina) = self.parse_stats()?;
        let mut fighter = FighterBuilder::new(name, hp, stamina, span);
        for action in self.parse_actions_block()? {
            fighter.add_action(action)?;
        }
        for combo in self.parse_combos_block()? {
            fighter.add_combo(combo)?;
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(fighter.build())
    }

    /// `"stats" "(" "hp" "=" NUM "," "st" "=" NUM ")" ";"`
    fn parse_stats(&mut self) -> Result<(u32, u32)> {
        self.expect(&TokenKind::Stats)?;
        self.expect(&TokenKind::LParen)?;
        self.expect(&TokenKind::Hp)?;
        self.expect(&TokenKind::Assign)?;
        let hp = self.expect_number("hit points")?;
        self.expect(&TokenKind::Comma)?;
        self.expect(&TokenKind::St)?;
        self.expect(&TokenKind::Assign)?;
        let stamina = self.expect_number("stamina")?;
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::Semicolon)?;
        Ok((hp, stamina))
    }

    /// `"acciones" "{" action+ "}"`
    fn parse_actions_block(&mut self) -> Result<Vec<AtomicAction>> {
        self.expect(&TokenKind::Acciones)?;
        self.expect(&TokenKind::LBrace)?;
        let mut actions = self.parse_action()?;
        while !self.at(&TokenKind::RBrace) {
            actions.extend(self.parse_action()?);
        }
        self.advance();
        Ok(actions)
    }

    /// `("golpe"|"patada") ":" strike ("," strike)* ";" | "bloqueo" ":" ID ";"`
    fn parse_action(&mut self) -> Result<Vec<AtomicAction>> {
        let kind = match self.current.kind {
            TokenKind::Golpe => ActionKind::Strike,
            TokenKind::Patada => ActionKind::Kick,
            TokenKind::Bloqueo => ActionKind::Block,
            _ => return Err(self.error_expected("'golpe', 'patada' or 'bloqueo'")),
        };
        self.advance();
        self.expect(&TokenKind::Colon)?;

        let actions = if kind == ActionKind::Block {
            let (name, span) = self.expect_ident("block name")?;
            vec![AtomicAction::block(name, span)]
        } else {
            let mut strikes = vec![self.parse_strike(kind)?];
            while self.eat(&TokenKind::Comma) {
                strikes.push(self.parse_strike(kind)?);
            }
            strikes
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(actions)
    }

    /// `ID "(" attribute ("," attribute)* ")"`
    fn parse_strike(&mut self, kind: ActionKind) -> Result<AtomicAction> {
        let (name, span) = self.expect_ident("strike name")?;
        let mut action = AtomicAction::new(kind, name, span);
        self.expect(&TokenKind::LParen)?;
        self.parse_attribute(&mut action)?;
        while self.eat(&TokenKind::Comma) {
            self.parse_attribute(&mut action)?;
        }
        self.expect(&TokenKind::RParen)?;
        Ok(action)
    }

    /// One `key = value` pair inside a strike. A repeated key overwrites.
    fn parse_attribute(&mut self, action: &mut AtomicAction) -> Result<()> {
        let key = self.current.kind.clone();
        match key {
            TokenKind::Dano | TokenKind::Costo => {
                self.advance();
                self.expect(&TokenKind::Assign)?;
                let value = self.expect_number("integer value")?;
                if key == TokenKind::Dano {
                    action.damage = value;
                } else {
                    action.cost = value;
                }
            }
            TokenKind::Altura => {
                self.advance();
                self.expect(&TokenKind::Assign)?;
                action.height = Some(match self.current.kind {
                    TokenKind::Alta => Height::High,
                    TokenKind::Media => Height::Mid,
                    TokenKind::Baja => Height::Low,
                    _ => return Err(self.error_expected("'alta', 'media' or 'baja'")),
                });
                self.advance();
            }
            TokenKind::Forma => {
                self.advance();
                self.expect(&TokenKind::Assign)?;
                action.shape = Some(match self.current.kind {
                    TokenKind::Frontal => Shape::Frontal,
                    TokenKind::Lateral => Shape::Lateral,
                    _ => return Err(self.error_expected("'frontal' or 'lateral'")),
                });
                self.advance();
            }
            TokenKind::Giratoria => {
                self.advance();
                self.expect(&TokenKind::Assign)?;
                action.spinning = match self.current.kind {
                    TokenKind::Si => true,
                    TokenKind::No => false,
                    _ => return Err(self.error_expected("'si' or 'no'")),
                };
                self.advance();
            }
            _ => {
                return Err(self.error_expected(
                    "strike attribute ('daño', 'costo', 'altura', 'forma' or 'giratoria')",
                ));
            }
        }
        Ok(())
    }

    /// `"combos" "{" combo+ "}"`
    fn parse_combos_block(&mut self) -> Result<Vec<Combo>> {
        self.expect(&TokenKind::Combos)?;
        self.expect(&TokenKind::LBrace)?;
        let mut combos = vec![self.parse_combo()?];
        while !self.at(&TokenKind::RBrace) {
            combos.push(self.parse_combo()?);
        }
        self.advance();
        Ok(combos)
    }

    /// `ID "(" "st_req" "=" NUM ")" "{" ID ("," ID)* "}"`
    fn parse_combo(&mut self) -> Result<Combo> {
        let (name, span) = self.expect_ident("combo name")?;
        self.expect(&TokenKind::LParen)?;
        self.expect(&TokenKind::StReq)?;
        self.expect(&TokenKind::Assign)?;
        let stamina_cost = self.expect_number("stamina requirement")?;
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::LBrace)?;
        let mut steps = vec![self.expect_ident("action name")?.0];
        while self.eat(&TokenKind::Comma) {
            steps.push(self.expect_ident("action name")?.0);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Combo {
            name,
            stamina_cost,
            steps,
            span,
        })
    }

    // -------------------------------------------------------------------------
    // Simulation block
    // -------------------------------------------------------------------------

    /// `"simulacion" "{" config fight "}"`
    fn parse_simulation(&mut self) -> Result<(SimulationConfig, Vec<TurnScript>)> {
        self.expect(&TokenKind::Simulacion)?;
        self.expect(&TokenKind::LBrace)?;
        let config = self.parse_config()?;
        let scripts = self.parse_fight()?;
        self.expect(&TokenKind::RBrace)?;
        Ok((config, scripts))
    }

    /// `"config" "{" "luchadores" ":" ID "vs" ID ";" "inicia" ":" ID ";" "turnos_max" ":" NUM ";" "}"`
    fn parse_config(&mut self) -> Result<SimulationConfig> {
        let span = self.expect(&TokenKind::Config)?.span;
        self.expect(&TokenKind::LBrace)?;

        self.expect(&TokenKind::Luchadores)?;
        self.expect(&TokenKind::Colon)?;
        let (fighter_a, _) = self.expect_ident("fighter name")?;
        self.expect(&TokenKind::Vs)?;
        let (fighter_b, _) = self.expect_ident("fighter name")?;
        self.expect(&TokenKind::Semicolon)?;

        self.expect(&TokenKind::Inicia)?;
        self.expect(&TokenKind::Colon)?;
        let (starting_fighter, _) = self.expect_ident("fighter name")?;
        self.expect(&TokenKind::Semicolon)?;

        self.expect(&TokenKind::TurnosMax)?;
        self.expect(&TokenKind::Colon)?;
        let max_turns = self.expect_number("turn limit")?;
        self.expect(&TokenKind::Semicolon)?;

        self.expect(&TokenKind::RBrace)?;
        Ok(SimulationConfig {
            fighter_a,
            fighter_b,
            starting_fighter,
            max_turns,
            span,
        })
    }

    /// `"pelea" "{" turn+ "}"`
    fn parse_fight(&mut self) -> Result<Vec<TurnScript>> {
        self.expect(&TokenKind::Pelea)?;
        self.expect(&TokenKind::LBrace)?;
        let mut scripts = vec![self.parse_turn()?];
        while !self.at(&TokenKind::RBrace) {
            scripts.push(self.parse_turn()?);
        }
        self.advance();
        Ok(scripts)
    }

    /// `"turno" ID "{" instruction+ "}"`
    fn parse_turn(&mut self) -> Result<TurnScript> {
        let start = self.expect(&TokenKind::Turno)?.span;
        let (fighter, _) = self.expect_ident("fighter name")?;
        let instructions = self.parse_block()?;
        Ok(TurnScript {
            fighter,
            instructions,
            span: start,
        })
    }

    /// `"{" instruction+ "}"`
    fn parse_block(&mut self) -> Result<Vec<Instruction>> {
        self.expect(&TokenKind::LBrace)?;
        let mut instructions = vec![self.parse_instruction()?];
        while !self.at(&TokenKind::RBrace) {
            instructions.push(self.parse_instruction()?);
        }
        self.advance();
        Ok(instructions)
    }

    /// `"usa" ID ";" | "si" "(" condition ")" block ["sino" block]`
    fn parse_instruction(&mut self) -> Result<Instruction> {
        match self.current.kind {
            TokenKind::Usa => {
                self.advance();
                let (name, span) = self.expect_ident("action or combo name")?;
                self.expect(&TokenKind::Semicolon)?;
                Ok(Instruction::Use { name, span })
            }
            TokenKind::Si => {
                if self.depth >= MAX_NESTING {
                    return Err(self.error_here(&format!(
                        "conditionals nested deeper than {MAX_NESTING} levels"
                    )));
                }
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let condition = self.parse_condition()?;
                self.expect(&TokenKind::RParen)?;

                self.depth += 1;
                let branches = self.parse_branches();
                self.depth -= 1;
                let (then_block, else_block) = branches?;

                Ok(Instruction::Conditional {
                    condition,
                    then_block,
                    else_block,
                })
            }
            _ => Err(self.error_expected("'usa' or 'si'")),
        }
    }

    fn parse_branches(&mut self) -> Result<(Vec<Instruction>, Vec<Instruction>)> {
        let then_block = self.parse_block()?;
        let else_block = if self.eat(&TokenKind::Sino) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok((then_block, else_block))
    }

    /// `("self"|"oponente") "." ("hp"|"st") relOp NUM`
    fn parse_condition(&mut self) -> Result<Condition> {
        let subject = match self.current.kind {
            TokenKind::SelfKw => Subject::Actor,
            TokenKind::Oponente => Subject::Opponent,
            _ => return Err(self.error_expected("'self' or 'oponente'")),
        };
        self.advance();
        self.expect(&TokenKind::Dot)?;

        let attribute = match self.current.kind {
            TokenKind::Hp => Attribute::Hp,
            TokenKind::St => Attribute::Stamina,
            _ => return Err(self.error_expected("'hp' or 'st'")),
        };
        self.advance();

        let op = match self.current.kind {
            TokenKind::Less => RelOp::Lt,
            TokenKind::Greater => RelOp::Gt,
            TokenKind::LessEq => RelOp::Le,
            TokenKind::GreaterEq => RelOp::Ge,
            TokenKind::EqEq => RelOp::Eq,
            TokenKind::NotEq => RelOp::Ne,
            _ => return Err(self.error_expected("relational operator")),
        };
        self.advance();

        let threshold = self.expect_number("threshold")?;
        Ok(Condition {
            subject,
            attribute,
            op,
            threshold,
        })
    }

    // -------------------------------------------------------------------------
    // Token helpers
    // -------------------------------------------------------------------------

    /// Returns true if the current token is of the given kind.
    fn at(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Consumes the current token if it is of the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<Token> {
        if self.at(expected) {
            let token = self.current.clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error_expected(&expected.name()))
        }
    }

    /// Expects an identifier and returns its text and span.
    fn expect_ident(&mut self, what: &str) -> Result<(String, Span)> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let name = name.clone();
            let span = self.current.span;
            self.advance();
            Ok((name, span))
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Expects an integer literal that fits in `u32`.
    fn expect_number(&mut self, what: &str) -> Result<u32> {
        let TokenKind::Number(value) = self.current.kind else {
            return Err(self.error_expected(what));
        };
        let Ok(value) = u32::try_from(value) else {
            return Err(self.error_here(&format!("integer literal for {what} is out of range")));
        };
        self.advance();
        Ok(value)
    }

    /// Creates an "expected X, found Y" error at the current token.
    fn error_expected(&self, expected: &str) -> Error {
        if self.current.kind == TokenKind::Eof {
            Error::unexpected_eof(expected)
        } else {
            self.error_here(&format!("expected {expected}, found {}", self.current.kind))
        }
    }

    /// Creates a syntax error at the current token.
    fn error_here(&self, message: &str) -> Error {
        let span = self.current.span;
        Error::syntax(
            message,
            span.line,
            span.column,
            span.line_text(self.source).to_string(),
        )
    }
}
