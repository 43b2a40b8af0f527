//! Combat execution.
//!
//! A combat runs in rounds. Each round:
//! 1. The starting fighter runs its turn script against the other
//! 2. The other fighter runs its turn script back
//! 3. If either fighter is at 0 hp after a turn, the combat stops
//!
//! A fighter without a turn script sits the round out. Actions and combos
//! are resolved by name against the acting fighter at execution time.
//!
//! Combo resolution is bounded twice: by nesting depth, and by the number
//! of combos one turn may enter. A turn that runs out of combos is cut
//! short after a single `ComboAborted` event.

use luchadores_foundation::{Error, Result};
use luchadores_language::{
    AtomicAction, Combo, Instruction, Program, Subject, TurnScript, validate,
};

use crate::config::EngineConfig;
use crate::event::{AbortReason, CombatEvent};
use crate::instance::FighterInstance;
use crate::log::EventLog;
use crate::result::{CombatResult, Outcome};

// =============================================================================
// Combat Executor
// =============================================================================

/// Runs combats described by a [`Program`].
///
/// The executor holds only configuration; every call to [`run`](Self::run)
/// starts from fresh fighter instances, so repeated runs are independent.
#[derive(Clone, Debug, Default)]
pub struct CombatExecutor {
    config: EngineConfig,
}

impl CombatExecutor {
    /// Creates an executor with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the program's combat to completion.
    ///
    /// # Errors
    /// Returns [`ErrorKind::UnknownFighter`](luchadores_foundation::ErrorKind::UnknownFighter)
    /// if the configuration names a fighter missing from the library, or a
    /// semantic error if the configuration is otherwise inconsistent. Parsed
    /// programs never fail here.
    pub fn run(&self, program: &Program) -> Result<(EventLog, CombatResult)> {
        let config = &program.config;
        for name in [&config.fighter_a, &config.fighter_b] {
            if program.fighter(name).is_none() {
                return Err(Error::unknown_fighter(name.as_str()));
            }
        }
        validate::check_config(program)?;

        let mut combat = Combat::new(program, &self.config)?;
        combat.fight(config.max_turns);
        Ok(combat.finish())
    }
}

// =============================================================================
// Combat State
// =============================================================================

/// State of one combat in progress. Index 0 is the starting fighter.
struct Combat<'p> {
    fighters: [FighterInstance; 2],
    scripts: [Option<&'p TurnScript>; 2],
    fighter_a: &'p str,
    log: EventLog,
    round: u32,
    knockout: bool,
    max_combo_depth: u32,
    max_combos_per_turn: u32,
    /// Combos entered so far this turn.
    combos_this_turn: u32,
    /// Set once the turn's combo budget is spent; nothing else resolves.
    turn_exhausted: bool,
    record_turn_starts: bool,
}

impl<'p> Combat<'p> {
    fn new(program: &'p Program, config: &EngineConfig) -> Result<Self> {
        let order = program.config.turn_order();
        let instance = |name: &str| {
            program
                .fighter(name)
                .map(FighterInstance::from_template)
                .ok_or_else(|| Error::unknown_fighter(name))
        };

        Ok(Self {
            fighters: [instance(order[0])?, instance(order[1])?],
            scripts: order.map(|name| program.script_for(name)),
            fighter_a: &program.config.fighter_a,
            log: EventLog::new(),
            round: 0,
            knockout: false,
            max_combo_depth: config.effective_combo_depth(),
            max_combos_per_turn: config.max_combos_per_turn,
            combos_this_turn: 0,
            turn_exhausted: false,
            record_turn_starts: config.record_turn_starts,
        })
    }

    fn fight(&mut self, max_turns: u32) {
        'rounds: for round in 1..=max_turns {
            self.round = round;
            tracing::debug!(target: "luchadores::engine", round, "round start");

            for actor in 0..2 {
                let Some(script) = self.scripts[actor] else {
                    tracing::debug!(
                        target: "luchadores::engine",
                        round,
                        fighter = self.fighters[actor].name(),
                        "no turn script, skipping"
                    );
                    continue;
                };

                self.combos_this_turn = 0;
                self.turn_exhausted = false;
                if self.record_turn_starts {
                    let fighter = self.fighters[actor].name().to_string();
                    self.emit(CombatEvent::TurnStart { round, fighter });
                }
                self.execute_block(actor, &script.instructions);

                if self.fighters.iter().any(FighterInstance::is_knocked_out) {
                    tracing::debug!(target: "luchadores::engine", round, "knockout");
                    self.knockout = true;
                    break 'rounds;
                }
            }
        }
    }

    fn finish(mut self) -> (EventLog, CombatResult) {
        let (a, b) = if self.fighters[0].name() == self.fighter_a {
            (0, 1)
        } else {
            (1, 0)
        };
        let fighter_a = self.fighters[a].snapshot();
        let fighter_b = self.fighters[b].snapshot();
        let outcome = Outcome::decide(&fighter_a, &fighter_b);
        tracing::debug!(target: "luchadores::engine", %outcome, rounds = self.round, "combat over");

        self.emit(CombatEvent::CombatEnd {
            fighter_a: fighter_a.clone(),
            fighter_b: fighter_b.clone(),
            outcome: outcome.clone(),
        });

        let result = CombatResult {
            fighter_a,
            fighter_b,
            outcome,
            rounds_played: self.round,
            knockout: self.knockout,
        };
        (self.log, result)
    }

    fn emit(&mut self, event: CombatEvent) {
        tracing::trace!(target: "luchadores::engine", round = self.round, event = event.event_type());
        self.log.push(self.round, event);
    }

    // -------------------------------------------------------------------------
    // Instructions
    // -------------------------------------------------------------------------

    fn execute_block(&mut self, actor: usize, instructions: &[Instruction]) {
        for instruction in instructions {
            if self.turn_exhausted {
                return;
            }
            match instruction {
                Instruction::Use { name, .. } => self.resolve(actor, name, 0, &mut Vec::new()),
                Instruction::Conditional {
                    condition,
                    then_block,
                    else_block,
                } => {
                    let subject = match condition.subject {
                        Subject::Actor => &self.fighters[actor],
                        Subject::Opponent => &self.fighters[1 - actor],
                    };
                    if condition.holds_for(subject.stat(condition.attribute)) {
                        self.execute_block(actor, then_block);
                    } else {
                        self.execute_block(actor, else_block);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolves `name` for `actor`: combo first, then atomic action.
    ///
    /// `depth` counts enclosing combos. `chain` holds the combos of the
    /// current run of fallbacks; it is reset whenever a combo is paid for.
    fn resolve(&mut self, actor: usize, name: &str, depth: u32, chain: &mut Vec<String>) {
        if self.turn_exhausted {
            return;
        }
        let fighter = &self.fighters[actor];
        if let Some(combo) = fighter.combo(name).cloned() {
            self.resolve_combo(actor, &combo, depth, chain);
        } else if let Some(action) = fighter.action(name).cloned() {
            self.resolve_action(actor, &action);
        } else {
            let actor_name = fighter.name().to_string();
            self.emit(CombatEvent::UnknownAction {
                actor: actor_name,
                name: name.to_string(),
            });
        }
    }

    fn resolve_combo(&mut self, actor: usize, combo: &Combo, depth: u32, chain: &mut Vec<String>) {
        let actor_name = self.fighters[actor].name().to_string();

        if self.combos_this_turn >= self.max_combos_per_turn {
            tracing::debug!(
                target: "luchadores::engine",
                round = self.round,
                fighter = %actor_name,
                budget = self.max_combos_per_turn,
                "combo budget spent, ending turn"
            );
            self.turn_exhausted = true;
            self.emit(CombatEvent::ComboAborted {
                actor: actor_name,
                combo: combo.name.clone(),
                reason: AbortReason::Budget,
            });
            return;
        }
        self.combos_this_turn += 1;

        if depth >= self.max_combo_depth {
            self.emit(CombatEvent::ComboAborted {
                actor: actor_name,
                combo: combo.name.clone(),
                reason: AbortReason::DepthLimit,
            });
            return;
        }

        let stamina = self.fighters[actor].stamina();
        if self.fighters[actor].spend(combo.stamina_cost) {
            self.emit(CombatEvent::ComboExecuted {
                actor: actor_name,
                combo: combo.name.clone(),
                cost: combo.stamina_cost,
                actor_stamina: self.fighters[actor].stamina(),
            });
            for step in &combo.steps {
                self.resolve(actor, step, depth + 1, &mut Vec::new());
            }
            return;
        }

        if chain.contains(&combo.name) {
            self.emit(CombatEvent::ComboAborted {
                actor: actor_name,
                combo: combo.name.clone(),
                reason: AbortReason::Cycle,
            });
            return;
        }
        let Some(first) = combo.first_step() else {
            tracing::trace!(target: "luchadores::engine", combo = %combo.name, "empty combo");
            return;
        };

        self.emit(CombatEvent::ComboFallback {
            actor: actor_name,
            combo: combo.name.clone(),
            cost: combo.stamina_cost,
            stamina,
            fallback: first.to_string(),
        });
        chain.push(combo.name.clone());
        self.resolve(actor, first, depth + 1, chain);
    }

    fn resolve_action(&mut self, actor: usize, action: &AtomicAction) {
        let actor_name = self.fighters[actor].name().to_string();

        if action.is_block() {
            self.emit(CombatEvent::BlockUsed {
                actor: actor_name,
                action: action.name.clone(),
            });
            return;
        }

        let stamina = self.fighters[actor].stamina();
        if !self.fighters[actor].spend(action.cost) {
            self.emit(CombatEvent::ActionFailed {
                actor: actor_name,
                action: action.name.clone(),
                cost: action.cost,
                stamina,
            });
            return;
        }

        let target = &mut self.fighters[1 - actor];
        let damage = target.take_damage(action.damage);
        let target_name = target.name().to_string();
        let target_hp = target.hp();
        self.emit(CombatEvent::ActionApplied {
            actor: actor_name,
            target: target_name,
            action: action.name.clone(),
            kind: action.kind,
            damage,
            cost: action.cost,
            target_hp,
            actor_stamina: self.fighters[actor].stamina(),
        });
    }
}
