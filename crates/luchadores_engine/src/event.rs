//! Combat events.
//!
//! Every observable step of a combat is recorded as a [`CombatEvent`].
//! Events carry everything a consumer needs to render them; the engine
//! itself never formats them.

use std::fmt;

use luchadores_language::ActionKind;

use crate::result::{FighterSnapshot, Outcome};

// =============================================================================
// Abort Reason
// =============================================================================

/// Why a combo was abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// A fallback chain re-entered a combo already on it.
    Cycle,
    /// Combo nesting exceeded the configured depth.
    DepthLimit,
    /// The turn entered more combos than the configured budget.
    Budget,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle => write!(f, "cycle"),
            Self::DepthLimit => write!(f, "depth-limit"),
            Self::Budget => write!(f, "budget"),
        }
    }
}

// =============================================================================
// Combat Event
// =============================================================================

/// Events emitted while a combat runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    /// A fighter's turn began.
    TurnStart {
        /// The round number (1-indexed).
        round: u32,
        /// The acting fighter.
        fighter: String,
    },

    /// A strike or kick landed.
    ActionApplied {
        /// The acting fighter.
        actor: String,
        /// The fighter hit.
        target: String,
        /// The action used.
        action: String,
        /// Strike or kick.
        kind: ActionKind,
        /// Hit points actually removed.
        damage: u32,
        /// Stamina paid.
        cost: u32,
        /// Target hit points afterwards.
        target_hp: u32,
        /// Actor stamina afterwards.
        actor_stamina: u32,
    },

    /// An action was skipped for lack of stamina.
    ActionFailed {
        /// The acting fighter.
        actor: String,
        /// The action attempted.
        action: String,
        /// Stamina required.
        cost: u32,
        /// Stamina available.
        stamina: u32,
    },

    /// A combo was paid for; its steps follow.
    ComboExecuted {
        /// The acting fighter.
        actor: String,
        /// The combo.
        combo: String,
        /// Stamina paid.
        cost: u32,
        /// Actor stamina afterwards.
        actor_stamina: u32,
    },

    /// A combo could not be paid for; only its first step follows.
    ComboFallback {
        /// The acting fighter.
        actor: String,
        /// The combo.
        combo: String,
        /// Stamina required.
        cost: u32,
        /// Stamina available.
        stamina: u32,
        /// The step resolved instead.
        fallback: String,
    },

    /// A block was used. Blocks have no effect.
    BlockUsed {
        /// The acting fighter.
        actor: String,
        /// The block used.
        action: String,
    },

    /// A name resolved to neither an action nor a combo.
    UnknownAction {
        /// The acting fighter.
        actor: String,
        /// The unresolved name.
        name: String,
    },

    /// A combo was abandoned without resolving anything further.
    ComboAborted {
        /// The acting fighter.
        actor: String,
        /// The combo.
        combo: String,
        /// Why it was abandoned.
        reason: AbortReason,
    },

    /// The combat is over.
    CombatEnd {
        /// First configured fighter, final state.
        fighter_a: FighterSnapshot,
        /// Second configured fighter, final state.
        fighter_b: FighterSnapshot,
        /// Who won.
        outcome: Outcome,
    },
}

impl CombatEvent {
    /// All event type names, in declaration order.
    pub const TYPES: [&'static str; 9] = [
        "turn-start",
        "action-applied",
        "action-failed",
        "combo-executed",
        "combo-fallback",
        "block-used",
        "unknown-action",
        "combo-aborted",
        "combat-end",
    ];

    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TurnStart { .. } => "turn-start",
            Self::ActionApplied { .. } => "action-applied",
            Self::ActionFailed { .. } => "action-failed",
            Self::ComboExecuted { .. } => "combo-executed",
            Self::ComboFallback { .. } => "combo-fallback",
            Self::BlockUsed { .. } => "block-used",
            Self::UnknownAction { .. } => "unknown-action",
            Self::ComboAborted { .. } => "combo-aborted",
            Self::CombatEnd { .. } => "combat-end",
        }
    }

    /// Returns the acting fighter, if the event has one.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        match self {
            Self::TurnStart { fighter: actor, .. }
            | Self::ActionApplied { actor, .. }
            | Self::ActionFailed { actor, .. }
            | Self::ComboExecuted { actor, .. }
            | Self::ComboFallback { actor, .. }
            | Self::BlockUsed { actor, .. }
            | Self::UnknownAction { actor, .. }
            | Self::ComboAborted { actor, .. } => Some(actor),
            Self::CombatEnd { .. } => None,
        }
    }

    /// Returns true if this is a combo-related event.
    #[must_use]
    pub fn is_combo_event(&self) -> bool {
        matches!(
            self,
            Self::ComboExecuted { .. } | Self::ComboFallback { .. } | Self::ComboAborted { .. }
        )
    }

    /// Returns true if the event changed a fighter's stats.
    #[must_use]
    pub fn changes_state(&self) -> bool {
        matches!(
            self,
            Self::ActionApplied { .. } | Self::ComboExecuted { .. }
        )
    }
}
