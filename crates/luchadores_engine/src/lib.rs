//! Combat execution engine for Luchadores.
//!
//! This crate provides:
//! - [`CombatExecutor`] - Runs the combat a [`Program`] describes
//! - [`FighterInstance`] - Per-run fighter state cloned from a template
//! - [`EventLog`] - Ordered, queryable record of every [`CombatEvent`]
//! - [`CombatResult`] - Final snapshots and outcome
//!
//! Execution is deterministic: the same program and configuration always
//! produce the same log and result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod event;
pub mod executor;
pub mod instance;
pub mod log;
pub mod result;

pub use config::{
    DEFAULT_MAX_COMBO_DEPTH, DEFAULT_MAX_COMBOS_PER_TURN, EngineConfig, MAX_COMBO_DEPTH,
};
pub use event::{AbortReason, CombatEvent};
pub use executor::CombatExecutor;
pub use instance::FighterInstance;
pub use log::{CombatRecord, EventLog, EventLogStats};
use luchadores_foundation::Result;
use luchadores_language::Program;
pub use result::{CombatResult, FighterSnapshot, Outcome};

/// Runs a program's combat with the default configuration.
///
/// # Errors
/// Returns an error only for hand-built programs whose configuration names
/// fighters missing from the library.
pub fn run(program: &Program) -> Result<(EventLog, CombatResult)> {
    CombatExecutor::default().run(program)
}

/// Runs a program's combat with the given configuration.
///
/// # Errors
/// See [`run`].
pub fn run_with_config(program: &Program, config: EngineConfig) -> Result<(EventLog, CombatResult)> {
    CombatExecutor::new(config).run(program)
}
