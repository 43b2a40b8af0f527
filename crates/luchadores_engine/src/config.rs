//! Engine configuration.

/// Default limit on nested combo resolution.
pub const DEFAULT_MAX_COMBO_DEPTH: u32 = 32;

/// Highest accepted combo depth. Resolution recurses once per level.
pub const MAX_COMBO_DEPTH: u32 = 256;

/// Default number of combos a single turn may enter.
pub const DEFAULT_MAX_COMBOS_PER_TURN: u32 = 1024;

/// Configuration for a [`CombatExecutor`](crate::CombatExecutor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest combo nesting resolved before the branch is aborted.
    /// Values above [`MAX_COMBO_DEPTH`] are treated as [`MAX_COMBO_DEPTH`].
    pub max_combo_depth: u32,
    /// Combos one turn may enter, paid or fallen back, before the rest of
    /// the turn is abandoned.
    pub max_combos_per_turn: u32,
    /// Whether `TurnStart` events are recorded.
    pub record_turn_starts: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_combo_depth: DEFAULT_MAX_COMBO_DEPTH,
            max_combos_per_turn: DEFAULT_MAX_COMBOS_PER_TURN,
            record_turn_starts: true,
        }
    }
}

impl EngineConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the combo depth limit, clamped to [`MAX_COMBO_DEPTH`].
    #[must_use]
    pub fn with_max_combo_depth(mut self, depth: u32) -> Self {
        self.max_combo_depth = depth.min(MAX_COMBO_DEPTH);
        self
    }

    /// Sets how many combos a single turn may enter.
    #[must_use]
    pub fn with_max_combos_per_turn(mut self, budget: u32) -> Self {
        self.max_combos_per_turn = budget;
        self
    }

    /// Enables or disables `TurnStart` events.
    #[must_use]
    pub fn with_turn_starts(mut self, enabled: bool) -> Self {
        self.record_turn_starts = enabled;
        self
    }

    /// Returns the depth limit actually enforced.
    #[must_use]
    pub fn effective_combo_depth(&self) -> u32 {
        self.max_combo_depth.min(MAX_COMBO_DEPTH)
    }
}
