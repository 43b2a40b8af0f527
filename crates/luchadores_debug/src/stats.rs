//! Per-fighter combat statistics.
//!
//! Aggregated from an [`EventLog`] after the fact; the engine does not
//! track any of this while running.

use std::collections::BTreeMap;
use std::fmt;

use luchadores_engine::{CombatEvent, EventLog};

/// Totals for one fighter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FighterStats {
    /// Turns taken.
    pub turns: u32,
    /// Hit points removed from the opponent.
    pub damage_dealt: u32,
    /// Hit points lost.
    pub damage_taken: u32,
    /// Stamina paid for actions and combos.
    pub stamina_spent: u32,
    /// Strikes and kicks that landed.
    pub actions_landed: u32,
    /// Actions skipped for lack of stamina.
    pub actions_failed: u32,
    /// Combos paid for.
    pub combos_executed: u32,
    /// Combos that fell back to their first step.
    pub combo_fallbacks: u32,
    /// Combos abandoned by the cycle or depth guard.
    pub combos_aborted: u32,
    /// Blocks used.
    pub blocks: u32,
    /// Names that resolved to nothing.
    pub unknown_actions: u32,
}

/// Statistics for every fighter that appears in a log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatStats {
    fighters: BTreeMap<String, FighterStats>,
}

impl CombatStats {
    /// Aggregates statistics from a log.
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        let mut stats = Self::default();
        for event in log.events() {
            stats.record(event);
        }
        stats
    }

    /// Folds one event into the totals.
    pub fn record(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::TurnStart { fighter, .. } => self.entry(fighter).turns += 1,
            CombatEvent::ActionApplied {
                actor,
                target,
                damage,
                cost,
                ..
            } => {
                let stats = self.entry(actor);
                stats.actions_landed += 1;
                stats.damage_dealt = stats.damage_dealt.saturating_add(*damage);
                stats.stamina_spent = stats.stamina_spent.saturating_add(*cost);
                let taken = &mut self.entry(target).damage_taken;
                *taken = taken.saturating_add(*damage);
            }
            CombatEvent::ActionFailed { actor, .. } => self.entry(actor).actions_failed += 1,
            CombatEvent::ComboExecuted { actor, cost, .. } => {
                let stats = self.entry(actor);
                stats.combos_executed += 1;
                stats.stamina_spent = stats.stamina_spent.saturating_add(*cost);
            }
            CombatEvent::ComboFallback { actor, .. } => self.entry(actor).combo_fallbacks += 1,
            CombatEvent::ComboAborted { actor, .. } => self.entry(actor).combos_aborted += 1,
            CombatEvent::BlockUsed { actor, .. } => self.entry(actor).blocks += 1,
            CombatEvent::UnknownAction { actor, .. } => self.entry(actor).unknown_actions += 1,
            CombatEvent::CombatEnd { .. } => {}
        }
    }

    /// Returns the totals for one fighter.
    #[must_use]
    pub fn fighter(&self, name: &str) -> Option<&FighterStats> {
        self.fighters.get(name)
    }

    /// Iterates over fighters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FighterStats)> {
        self.fighters.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    fn entry(&mut self, name: &str) -> &mut FighterStats {
        self.fighters.entry(name.to_string()).or_default()
    }
}

impl fmt::Display for CombatStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:>5} {:>6} {:>6} {:>6} {:>5} {:>5} {:>6} {:>5}",
            "fighter", "turns", "dealt", "taken", "spent", "hits", "fails", "combos", "block"
        )?;
        for (name, s) in self.iter() {
            writeln!(
                f,
                "{:<12} {:>5} {:>6} {:>6} {:>6} {:>5} {:>5} {:>6} {:>5}",
                name,
                s.turns,
                s.damage_dealt,
                s.damage_taken,
                s.stamina_spent,
                s.actions_landed,
                s.actions_failed,
                s.combos_executed,
                s.blocks
            )?;
        }
        Ok(())
    }
}
