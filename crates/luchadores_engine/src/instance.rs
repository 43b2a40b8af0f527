//! Runtime fighter instances.
//!
//! An instance is a clone of a library template plus live `hp` and
//! `stamina`. The template's action and combo tables are persistent maps,
//! so the clone is cheap and the library is never written to.

use luchadores_language::{Attribute, AtomicAction, Combo, Fighter};

use crate::result::FighterSnapshot;

/// A fighter taking part in one combat.
#[derive(Clone, Debug)]
pub struct FighterInstance {
    template: Fighter,
    hp: u32,
    stamina: u32,
}

impl FighterInstance {
    /// Creates a fresh instance at full hit points and stamina.
    #[must_use]
    pub fn from_template(template: &Fighter) -> Self {
        Self {
            hp: template.hp_max,
            stamina: template.stamina_max,
            template: template.clone(),
        }
    }

    /// Returns the fighter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Returns current hit points.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Returns current stamina.
    #[must_use]
    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    /// Returns the value of a stat, for condition evaluation.
    #[must_use]
    pub fn stat(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Hp => self.hp,
            Attribute::Stamina => self.stamina,
        }
    }

    /// Returns true once hit points reach zero.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.hp == 0
    }

    /// Looks up one of the fighter's atomic actions.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AtomicAction> {
        self.template.action(name)
    }

    /// Looks up one of the fighter's combos.
    #[must_use]
    pub fn combo(&self, name: &str) -> Option<&Combo> {
        self.template.combo(name)
    }

    /// Pays `cost` stamina if enough is available. Returns false otherwise.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.stamina.checked_sub(cost) {
            Some(rest) => {
                self.stamina = rest;
                true
            }
            None => false,
        }
    }

    /// Removes hit points, stopping at zero. Returns the hit points actually lost.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(damage);
        before - self.hp
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            name: self.template.name.clone(),
            hp: self.hp,
            stamina: self.stamina,
            hp_max: self.template.hp_max,
            stamina_max: self.template.stamina_max,
        }
    }
}
