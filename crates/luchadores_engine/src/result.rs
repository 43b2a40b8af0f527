//! Combat outcome types.

use std::fmt;

/// A fighter's state at one point in the combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FighterSnapshot {
    /// Fighter name.
    pub name: String,
    /// Hit points.
    pub hp: u32,
    /// Stamina.
    pub stamina: u32,
    /// Maximum hit points.
    pub hp_max: u32,
    /// Maximum stamina.
    pub stamina_max: u32,
}

impl fmt::Display for FighterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (hp {}/{}, st {}/{})",
            self.name, self.hp, self.hp_max, self.stamina, self.stamina_max
        )
    }
}

/// How a combat ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The named fighter finished with strictly more hit points.
    Winner(String),
    /// Both fighters finished with the same hit points.
    Tie,
}

impl Outcome {
    /// Decides the outcome from final hit points.
    #[must_use]
    pub fn decide(a: &FighterSnapshot, b: &FighterSnapshot) -> Self {
        match a.hp.cmp(&b.hp) {
            std::cmp::Ordering::Greater => Self::Winner(a.name.clone()),
            std::cmp::Ordering::Less => Self::Winner(b.name.clone()),
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }

    /// Returns the winner's name, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Winner(name) => Some(name),
            Self::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(name) => write!(f, "{name} wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// The final result of a combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatResult {
    /// First configured fighter.
    pub fighter_a: FighterSnapshot,
    /// Second configured fighter.
    pub fighter_b: FighterSnapshot,
    /// Who won.
    pub outcome: Outcome,
    /// Rounds started, including the one cut short by a knockout.
    pub rounds_played: u32,
    /// Whether the combat ended early because a fighter reached 0 hp.
    pub knockout: bool,
}

impl CombatResult {
    /// Looks up a fighter's final state by name.
    #[must_use]
    pub fn fighter(&self, name: &str) -> Option<&FighterSnapshot> {
        [&self.fighter_a, &self.fighter_b]
            .into_iter()
            .find(|snapshot| snapshot.name == name)
    }
}
