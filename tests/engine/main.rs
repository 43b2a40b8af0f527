//! Integration tests for Layer 2: Engine
//!
//! Tests for turn order, action resolution, combos, and outcomes.

mod combos;
mod scenarios;

use luchadores_engine::{CombatResult, EventLog};
use luchadores_language::{Program, parse};

/// Builds a Rex vs Tom program from fighter declarations and turn scripts.
pub fn program(fighters: &str, scripts: &str, start: &str, turns: u32) -> Program {
    parse(&format!(
        "{fighters}
        simulacion {{
            config {{ luchadores: Rex vs Tom; inicia: {start}; turnos_max: {turns}; }}
            pelea {{ {scripts} }}
        }}"
    ))
    .unwrap()
}

/// Runs a program with the default engine configuration.
pub fn run(program: &Program) -> (EventLog, CombatResult) {
    luchadores_engine::run(program).unwrap()
}
