//! Program assembly.
//!
//! The parser's productions return plain values. This module is the one
//! place where those values are inserted into tables: [`FighterBuilder`]
//! is the explicit "fighter currently being defined", and
//! [`ProgramBuilder`] owns the library being assembled. Both reject
//! duplicate names, and [`ProgramBuilder::build`] runs the fatal half of
//! semantic validation before handing out a [`Program`].

use im::OrdMap;
use luchadores_foundation::{Error, Result};

use crate::ast::{AtomicAction, Combo, Fighter, Program, SimulationConfig, TurnScript};
use crate::span::Span;
use crate::validate;

/// Accumulates one fighter's actions and combos.
#[derive(Clone, Debug)]
pub struct FighterBuilder {
    fighter: Fighter,
}

impl FighterBuilder {
    /// Starts a fighter with the given stat block.
    #[must_use]
    pub fn new(name: impl Into<String>, hp_max: u32, stamina_max: u32, span: Span) -> Self {
        Self {
            fighter: Fighter {
                name: name.into(),
                hp_max,
                stamina_max,
                actions: OrdMap::new(),
                combos: OrdMap::new(),
                span,
            },
        }
    }

    /// Adds an atomic action.
    ///
    /// # Errors
    /// Returns a semantic error if the fighter already has an action by that name.
    pub fn add_action(&mut self, action: AtomicAction) -> Result<()> {
        if let Some(existing) = self.fighter.actions.get(&action.name) {
            return Err(Error::semantic(
                format!(
                    "fighter '{}' declares action '{}' twice (first at line {})",
                    self.fighter.name, action.name, existing.span.line
                ),
                action.span.line,
            ));
        }
        self.fighter.actions.insert(action.name.clone(), action);
        Ok(())
    }

    /// Adds a combo.
    ///
    /// # Errors
    /// Returns a semantic error if the fighter already has a combo by that name.
    pub fn add_combo(&mut self, combo: Combo) -> Result<()> {
        if let Some(existing) = self.fighter.combos.get(&combo.name) {
            return Err(Error::semantic(
                format!(
                    "fighter '{}' declares combo '{}' twice (first at line {})",
                    self.fighter.name, combo.name, existing.span.line
                ),
                combo.span.line,
            ));
        }
        self.fighter.combos.insert(combo.name.clone(), combo);
        Ok(())
    }

    /// Finishes the fighter.
    #[must_use]
    pub fn build(self) -> Fighter {
        self.fighter
    }
}

/// Accumulates the fighter library and assembles the final program.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    fighters: OrdMap<String, Fighter>,
}

impl ProgramBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fighter into the library.
    ///
    /// # Errors
    /// Returns a semantic error if a fighter with that name already exists.
    pub fn add_fighter(&mut self, fighter: Fighter) -> Result<()> {
        if let Some(existing) = self.fighters.get(&fighter.name) {
            return Err(Error::semantic(
                format!(
                    "fighter '{}' is declared twice (first at line {})",
                    fighter.name, existing.span.line
                ),
                fighter.span.line,
            ));
        }
        self.fighters.insert(fighter.name.clone(), fighter);
        Ok(())
    }

    /// Returns the number of fighters added so far.
    #[must_use]
    pub fn fighter_count(&self) -> usize {
        self.fighters.len()
    }

    /// Assembles the program and checks its configuration.
    ///
    /// # Errors
    /// Returns a semantic error if the configuration is inconsistent with
    /// the library (see [`validate::check_config`]).
    pub fn build(self, config: SimulationConfig, scripts: Vec<TurnScript>) -> Result<Program> {
        let program = Program {
            fighters: self.fighters,
            config,
            scripts,
        };
        validate::check_config(&program)?;
        Ok(program)
    }
}
