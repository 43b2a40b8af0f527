//! Semantic validation.
//!
//! Two tiers:
//! - [`check_config`] rejects programs the engine cannot run at all
//!   (missing or repeated combatants, a starter outside the fight, zero
//!   rounds). It runs as part of assembly, so a parsed [`Program`] always
//!   passes it.
//! - [`check`] reports [`Warning`]s about references that will only fail
//!   at execution time. The engine tolerates all of them, so they never
//!   stop a parse.

use std::collections::HashSet;

use luchadores_foundation::{Error, Result};
use thiserror::Error;

use crate::ast::{Fighter, Program};

/// A non-fatal problem found by [`check`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Warning {
    /// A combo step names neither an action nor a combo of its fighter.
    #[error("line {line}: combo '{combo}' of '{fighter}' uses unknown step '{step}'")]
    UnknownComboStep {
        /// Owning fighter.
        fighter: String,
        /// The combo.
        combo: String,
        /// The unresolved step.
        step: String,
        /// Line of the combo declaration.
        line: u32,
    },

    /// A `usa` instruction names neither an action nor a combo of the scripted fighter.
    #[error("line {line}: '{fighter}' has no action or combo named '{name}'")]
    UnknownAction {
        /// Scripted fighter.
        fighter: String,
        /// The unresolved name.
        name: String,
        /// Line of the instruction.
        line: u32,
    },

    /// A turn script drives a fighter that is not in the fight.
    #[error("line {line}: turn script for '{fighter}' is never run, it is not one of the combatants")]
    NonCombatantScript {
        /// The fighter named by the script.
        fighter: String,
        /// Line of the `turno` block.
        line: u32,
    },

    /// A later turn script for the same fighter replaces this one.
    #[error("line {line}: turn script for '{fighter}' is shadowed by a later one")]
    ShadowedScript {
        /// The fighter named by both scripts.
        fighter: String,
        /// Line of the shadowed `turno` block.
        line: u32,
    },

    /// Following first steps from a combo leads back to it.
    #[error("line {line}: combo '{combo}' of '{fighter}' can fall back into itself")]
    FallbackCycle {
        /// Owning fighter.
        fighter: String,
        /// The combo on the cycle.
        combo: String,
        /// Line of the combo declaration.
        line: u32,
    },

    /// A fighter has an action and a combo with the same name; the combo wins.
    #[error("line {line}: combo '{name}' of '{fighter}' shadows the action of the same name")]
    ComboShadowsAction {
        /// Owning fighter.
        fighter: String,
        /// The shared name.
        name: String,
        /// Line of the combo declaration.
        line: u32,
    },
}

impl Warning {
    /// Returns the line the warning points at.
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            Self::UnknownComboStep { line, .. }
            | Self::UnknownAction { line, .. }
            | Self::NonCombatantScript { line, .. }
            | Self::ShadowedScript { line, .. }
            | Self::FallbackCycle { line, .. }
            | Self::ComboShadowsAction { line, .. } => *line,
        }
    }
}

/// Checks that the simulation config can be run against the library.
///
/// # Errors
/// Returns a semantic error if a combatant is missing from the library,
/// both combatants are the same fighter, the starter is not one of them,
/// or the round limit is zero.
pub fn check_config(program: &Program) -> Result<()> {
    let config = &program.config;
    let line = config.span.line;

    for name in [&config.fighter_a, &config.fighter_b] {
        if program.fighter(name).is_none() {
            return Err(Error::semantic(
                format!("combatant '{name}' is not a declared fighter"),
                line,
            ));
        }
    }
    if config.fighter_a == config.fighter_b {
        return Err(Error::semantic(
            format!("'{}' cannot fight itself", config.fighter_a),
            line,
        ));
    }
    if config.starting_fighter != config.fighter_a && config.starting_fighter != config.fighter_b {
        return Err(Error::semantic(
            format!(
                "starting fighter '{}' must be '{}' or '{}'",
                config.starting_fighter, config.fighter_a, config.fighter_b
            ),
            line,
        ));
    }
    if config.max_turns == 0 {
        return Err(Error::semantic("turnos_max must be at least 1", line));
    }
    Ok(())
}

/// Reports references that will not resolve at execution time.
#[must_use]
pub fn check(program: &Program) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for fighter in program.fighters.values() {
        check_fighter(fighter, &mut warnings);
    }

    let combatants = [&program.config.fighter_a, &program.config.fighter_b];
    for (index, script) in program.scripts.iter().enumerate() {
        if !combatants.contains(&&script.fighter) {
            warnings.push(Warning::NonCombatantScript {
                fighter: script.fighter.clone(),
                line: script.span.line,
            });
            continue;
        }
        if program.scripts[index + 1..]
            .iter()
            .any(|later| later.fighter == script.fighter)
        {
            warnings.push(Warning::ShadowedScript {
                fighter: script.fighter.clone(),
                line: script.span.line,
            });
            continue;
        }
        let Some(fighter) = program.fighter(&script.fighter) else {
            continue;
        };
        for instruction in &script.instructions {
            instruction.for_each_use(&mut |name, span| {
                if !fighter.knows(name) {
                    warnings.push(Warning::UnknownAction {
                        fighter: fighter.name.clone(),
                        name: name.to_string(),
                        line: span.line,
                    });
                }
            });
        }
    }

    for warning in &warnings {
        tracing::debug!(target: "luchadores::validate", %warning, "validation warning");
    }
    warnings
}

fn check_fighter(fighter: &Fighter, warnings: &mut Vec<Warning>) {
    for combo in fighter.combos.values() {
        if fighter.actions.contains_key(&combo.name) {
            warnings.push(Warning::ComboShadowsAction {
                fighter: fighter.name.clone(),
                name: combo.name.clone(),
                line: combo.span.line,
            });
        }
        for step in &combo.steps {
            if !fighter.knows(step) {
                warnings.push(Warning::UnknownComboStep {
                    fighter: fighter.name.clone(),
                    combo: combo.name.clone(),
                    step: step.clone(),
                    line: combo.span.line,
                });
            }
        }
        if falls_back_into_itself(fighter, &combo.name) {
            warnings.push(Warning::FallbackCycle {
                fighter: fighter.name.clone(),
                combo: combo.name.clone(),
                line: combo.span.line,
            });
        }
    }
}

/// Follows first steps from `start` through combos and reports whether the
/// chain returns to `start`.
fn falls_back_into_itself(fighter: &Fighter, start: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = start;
    while let Some(next) = fighter.combo(current).and_then(|c| c.first_step()) {
        if next == start {
            return true;
        }
        if fighter.combo(next).is_none() || !seen.insert(next) {
            return false;
        }
        current = next;
    }
    false
}
