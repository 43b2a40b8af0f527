//! Event output formatters.
//!
//! Provides human-readable and JSON formatters for combat records and
//! results.

use std::fmt::Write;

use luchadores_engine::{CombatEvent, CombatRecord, CombatResult, FighterSnapshot, Outcome};

// =============================================================================
// Event Formatter Trait
// =============================================================================

/// Trait for formatting combat records.
pub trait EventFormatter {
    /// Formats a single record to a string.
    fn format(&self, record: &CombatRecord) -> String;

    /// Formats the final result.
    fn format_result(&self, result: &CombatResult) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&CombatRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats combat records as text for a console.
#[derive(Clone, Debug)]
pub struct HumanFormatter {
    /// Whether to include record IDs.
    pub show_ids: bool,
    /// Whether to include the round prefix.
    pub show_rounds: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    /// Creates a new human formatter with round prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_ids: false,
            show_rounds: true,
        }
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Builder method to hide round prefixes.
    #[must_use]
    pub fn without_rounds(mut self) -> Self {
        self.show_rounds = false;
        self
    }

    fn fighter_line(snapshot: &FighterSnapshot) -> String {
        format!(
            "{}: hp {}/{}, st {}/{}",
            snapshot.name, snapshot.hp, snapshot.hp_max, snapshot.stamina, snapshot.stamina_max
        )
    }
}

impl EventFormatter for HumanFormatter {
    fn format(&self, record: &CombatRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:04}] ", record.id);
        }
        if self.show_rounds {
            let _ = write!(prefix, "R{:02} ", record.round);
        }

        let event_str = match &record.event {
            CombatEvent::TurnStart { round, fighter } => {
                format!("--- round {round}: {fighter} ---")
            }
            CombatEvent::ActionApplied {
                actor,
                target,
                action,
                kind,
                damage,
                cost,
                target_hp,
                actor_stamina,
            } => format!(
                "  {actor} uses {action} ({kind}): {target} takes {damage} (hp {target_hp}), \
                 {actor} pays {cost} (st {actor_stamina})"
            ),
            CombatEvent::ActionFailed {
                actor,
                action,
                cost,
                stamina,
            } => format!("  {actor} is too tired for {action} (needs {cost}, has {stamina})"),
            CombatEvent::ComboExecuted {
                actor,
                combo,
                cost,
                actor_stamina,
            } => format!("  {actor} launches combo {combo} for {cost} (st {actor_stamina})"),
            CombatEvent::ComboFallback {
                actor,
                combo,
                cost,
                stamina,
                fallback,
            } => format!(
                "  {actor} cannot afford combo {combo} (needs {cost}, has {stamina}), falls back to {fallback}"
            ),
            CombatEvent::BlockUsed { actor, action } => {
                format!("  {actor} blocks with {action}")
            }
            CombatEvent::UnknownAction { actor, name } => {
                format!("  {actor} does not know '{name}'")
            }
            CombatEvent::ComboAborted {
                actor,
                combo,
                reason,
            } => format!("  {actor} abandons combo {combo} ({reason})"),
            CombatEvent::CombatEnd {
                fighter_a,
                fighter_b,
                outcome,
            } => format!(
                "=== combat over: {} | {} | {outcome} ===",
                Self::fighter_line(fighter_a),
                Self::fighter_line(fighter_b)
            ),
        };

        format!("{prefix}{event_str}")
    }

    fn format_result(&self, result: &CombatResult) -> String {
        let verdict = match &result.outcome {
            Outcome::Winner(name) => format!("Winner: {name}"),
            Outcome::Tie => "Tie".to_string(),
        };
        let ending = if result.knockout { ", knockout" } else { "" };
        format!(
            "{}\n{}\n{verdict} after {} round(s){ending}",
            Self::fighter_line(&result.fighter_a),
            Self::fighter_line(&result.fighter_b),
            result.rounds_played
        )
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats combat records as JSON, one object per record.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether `format_many` emits an indented array.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }

    fn string(s: &str) -> String {
        format!("\"{}\"", Self::escape_string(s))
    }

    fn snapshot(snapshot: &FighterSnapshot) -> String {
        format!(
            "{{\"name\":{},\"hp\":{},\"stamina\":{},\"hp_max\":{},\"stamina_max\":{}}}",
            Self::string(&snapshot.name),
            snapshot.hp,
            snapshot.stamina,
            snapshot.hp_max,
            snapshot.stamina_max
        )
    }

    fn outcome(outcome: &Outcome) -> String {
        match outcome {
            Outcome::Winner(name) => Self::string(name),
            Outcome::Tie => "null".to_string(),
        }
    }
}

impl EventFormatter for JsonFormatter {
    fn format(&self, record: &CombatRecord) -> String {
        let s = Self::string;

        let event_data = match &record.event {
            CombatEvent::TurnStart { fighter, .. } => format!("\"fighter\":{}", s(fighter)),
            CombatEvent::ActionApplied {
                actor,
                target,
                action,
                kind,
                damage,
                cost,
                target_hp,
                actor_stamina,
            } => format!(
                "\"actor\":{},\"target\":{},\"action\":{},\"kind\":\"{kind}\",\"damage\":{damage},\
                 \"cost\":{cost},\"target_hp\":{target_hp},\"actor_stamina\":{actor_stamina}",
                s(actor),
                s(target),
                s(action)
            ),
            CombatEvent::ActionFailed {
                actor,
                action,
                cost,
                stamina,
            } => format!(
                "\"actor\":{},\"action\":{},\"cost\":{cost},\"stamina\":{stamina}",
                s(actor),
                s(action)
            ),
            CombatEvent::ComboExecuted {
                actor,
                combo,
                cost,
                actor_stamina,
            } => format!(
                "\"actor\":{},\"combo\":{},\"cost\":{cost},\"actor_stamina\":{actor_stamina}",
                s(actor),
                s(combo)
            ),
            CombatEvent::ComboFallback {
                actor,
                combo,
                cost,
                stamina,
                fallback,
            } => format!(
                "\"actor\":{},\"combo\":{},\"cost\":{cost},\"stamina\":{stamina},\"fallback\":{}",
                s(actor),
                s(combo),
                s(fallback)
            ),
            CombatEvent::BlockUsed { actor, action } => {
                format!("\"actor\":{},\"action\":{}", s(actor), s(action))
            }
            CombatEvent::UnknownAction { actor, name } => {
                format!("\"actor\":{},\"name\":{}", s(actor), s(name))
            }
            CombatEvent::ComboAborted {
                actor,
                combo,
                reason,
            } => format!(
                "\"actor\":{},\"combo\":{},\"reason\":\"{reason}\"",
                s(actor),
                s(combo)
            ),
            CombatEvent::CombatEnd {
                fighter_a,
                fighter_b,
                outcome,
            } => format!(
                "\"fighter_a\":{},\"fighter_b\":{},\"winner\":{}",
                Self::snapshot(fighter_a),
                Self::snapshot(fighter_b),
                Self::outcome(outcome)
            ),
        };

        format!(
            "{{\"id\":{},\"round\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.round,
            record.event_type(),
            event_data
        )
    }

    fn format_result(&self, result: &CombatResult) -> String {
        format!(
            "{{\"type\":\"result\",\"fighter_a\":{},\"fighter_b\":{},\"winner\":{},\"rounds_played\":{},\"knockout\":{}}}",
            Self::snapshot(&result.fighter_a),
            Self::snapshot(&result.fighter_b),
            Self::outcome(&result.outcome),
            result.rounds_played,
            result.knockout
        )
    }

    fn format_many(&self, records: &[&CombatRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
