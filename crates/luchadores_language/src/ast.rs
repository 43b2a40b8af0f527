//! Abstract Syntax Tree for the Luchadores DSL.
//!
//! A parsed [`Program`] is immutable: the engine clones fighter templates
//! into runtime instances and never writes back. Action and combo tables
//! are persistent [`im::OrdMap`]s, so those clones share structure.

use std::fmt;

use im::OrdMap;

use crate::span::Span;

// =============================================================================
// Actions
// =============================================================================

/// The kind of an atomic action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Declared under `golpe`.
    Strike,
    /// Declared under `patada`.
    Kick,
    /// Declared under `bloqueo`.
    Block,
}

impl ActionKind {
    /// Returns the keyword that introduces this kind in source.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Strike => "golpe",
            Self::Kick => "patada",
            Self::Block => "bloqueo",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strike => write!(f, "strike"),
            Self::Kick => write!(f, "kick"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Target height of a strike (`altura`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Height {
    /// `alta`
    High,
    /// `media`
    Mid,
    /// `baja`
    Low,
}

impl Height {
    /// Returns the source keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::High => "alta",
            Self::Mid => "media",
            Self::Low => "baja",
        }
    }
}

/// Trajectory of a strike (`forma`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `frontal`
    Frontal,
    /// `lateral`
    Lateral,
}

impl Shape {
    /// Returns the source keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Frontal => "frontal",
            Self::Lateral => "lateral",
        }
    }
}

/// A single strike, kick, or block owned by one fighter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicAction {
    /// Strike, kick, or block.
    pub kind: ActionKind,
    /// Name, unique among the owning fighter's actions.
    pub name: String,
    /// Hit points removed from the opponent.
    pub damage: u32,
    /// Stamina paid by the actor.
    pub cost: u32,
    /// Optional target height.
    pub height: Option<Height>,
    /// Optional trajectory.
    pub shape: Option<Shape>,
    /// Whether the strike spins (`giratoria`).
    pub spinning: bool,
    /// Where the action was declared.
    pub span: Span,
}

impl AtomicAction {
    /// Creates an action with zero damage and cost and no descriptive attributes.
    #[must_use]
    pub fn new(kind: ActionKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            damage: 0,
            cost: 0,
            height: None,
            shape: None,
            spinning: false,
            span,
        }
    }

    /// Creates a block. Blocks carry no damage or cost.
    #[must_use]
    pub fn block(name: impl Into<String>, span: Span) -> Self {
        Self::new(ActionKind::Block, name, span)
    }

    /// Builder method to set damage.
    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Builder method to set stamina cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Returns true if this action is a block.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.kind == ActionKind::Block
    }
}

/// A named, stamina-gated sequence of action or combo references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combo {
    /// Name, unique among the owning fighter's combos.
    pub name: String,
    /// Stamina required (and paid) to execute the full sequence.
    pub stamina_cost: u32,
    /// Names resolved in order against the same fighter at execution time.
    pub steps: Vec<String>,
    /// Where the combo was declared.
    pub span: Span,
}

impl Combo {
    /// Returns the step used when stamina is insufficient.
    #[must_use]
    pub fn first_step(&self) -> Option<&str> {
        self.steps.first().map(String::as_str)
    }
}

// =============================================================================
// Fighters
// =============================================================================

/// A fighter template from the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fighter {
    /// Name, unique in the library.
    pub name: String,
    /// Starting and maximum hit points.
    pub hp_max: u32,
    /// Starting and maximum stamina.
    pub stamina_max: u32,
    /// Atomic actions by name.
    pub actions: OrdMap<String, AtomicAction>,
    /// Combos by name.
    pub combos: OrdMap<String, Combo>,
    /// Where the fighter was declared.
    pub span: Span,
}

impl Fighter {
    /// Looks up an atomic action.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AtomicAction> {
        self.actions.get(name)
    }

    /// Looks up a combo.
    #[must_use]
    pub fn combo(&self, name: &str) -> Option<&Combo> {
        self.combos.get(name)
    }

    /// Returns true if `name` resolves to an action or a combo.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        self.combos.contains_key(name) || self.actions.contains_key(name)
    }
}

// =============================================================================
// Instructions
// =============================================================================

/// Which fighter a condition inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    /// `self`: the fighter whose script is running.
    Actor,
    /// `oponente`
    Opponent,
}

/// Which stat a condition inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `hp`
    Hp,
    /// `st`
    Stamina,
}

/// Relational operator in a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl RelOp {
    /// Applies the operator.
    #[must_use]
    pub const fn compare(self, lhs: u32, rhs: u32) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Gt => lhs > rhs,
            Self::Le => lhs <= rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    /// Returns the source spelling.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// A comparison of one live stat against a literal threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Whose stat is read.
    pub subject: Subject,
    /// Which stat is read.
    pub attribute: Attribute,
    /// How it is compared.
    pub op: RelOp,
    /// The literal right-hand side.
    pub threshold: u32,
}

impl Condition {
    /// Evaluates the condition given the current value of the inspected stat.
    #[must_use]
    pub const fn holds_for(&self, value: u32) -> bool {
        self.op.compare(value, self.threshold)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match self.subject {
            Subject::Actor => "self",
            Subject::Opponent => "oponente",
        };
        let attribute = match self.attribute {
            Attribute::Hp => "hp",
            Attribute::Stamina => "st",
        };
        write!(
            f,
            "{subject}.{attribute} {} {}",
            self.op.symbol(),
            self.threshold
        )
    }
}

/// One step of a turn script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `usa NAME;`
    Use {
        /// Action or combo to resolve.
        name: String,
        /// Where the instruction appears.
        span: Span,
    },
    /// `si (cond) { ... } sino { ... }`
    Conditional {
        /// The branch condition.
        condition: Condition,
        /// Instructions run when the condition holds.
        then_block: Vec<Instruction>,
        /// Instructions run otherwise (may be empty).
        else_block: Vec<Instruction>,
    },
}

impl Instruction {
    /// Creates a `usa` instruction with a default span.
    #[must_use]
    pub fn use_action(name: impl Into<String>) -> Self {
        Self::Use {
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Calls `f` for every `usa` instruction in this tree, depth first.
    pub fn for_each_use<'a>(&'a self, f: &mut impl FnMut(&'a str, Span)) {
        match self {
            Self::Use { name, span } => f(name, *span),
            Self::Conditional {
                then_block,
                else_block,
                ..
            } => {
                for instruction in then_block.iter().chain(else_block) {
                    instruction.for_each_use(f);
                }
            }
        }
    }
}

/// The instructions a fighter runs each round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnScript {
    /// The fighter this script drives.
    pub fighter: String,
    /// Instructions, in order.
    pub instructions: Vec<Instruction>,
    /// Where the `turno` block was declared.
    pub span: Span,
}

// =============================================================================
// Simulation
// =============================================================================

/// The `config` block of a simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// First fighter named after `luchadores:`.
    pub fighter_a: String,
    /// Second fighter named after `luchadores:`.
    pub fighter_b: String,
    /// Fighter that acts first in every round.
    pub starting_fighter: String,
    /// Number of rounds before the combat is decided on hit points.
    pub max_turns: u32,
    /// Where the `config` block was declared.
    pub span: Span,
}

impl SimulationConfig {
    /// Returns the fixed per-round order: the starter, then the other fighter.
    #[must_use]
    pub fn turn_order(&self) -> [&str; 2] {
        let other = if self.starting_fighter == self.fighter_a {
            &self.fighter_b
        } else {
            &self.fighter_a
        };
        [self.starting_fighter.as_str(), other.as_str()]
    }
}

/// A complete parsed program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    /// Fighter templates by name.
    pub fighters: OrdMap<String, Fighter>,
    /// Who fights, who starts, for how long.
    pub config: SimulationConfig,
    /// Turn scripts in declaration order.
    pub scripts: Vec<TurnScript>,
}

impl Program {
    /// Looks up a fighter template.
    #[must_use]
    pub fn fighter(&self, name: &str) -> Option<&Fighter> {
        self.fighters.get(name)
    }

    /// Returns the script for a fighter. The last declared script wins.
    #[must_use]
    pub fn script_for(&self, fighter: &str) -> Option<&TurnScript> {
        self.scripts.iter().rev().find(|s| s.fighter == fighter)
    }

    /// Summarizes the declared entities.
    #[must_use]
    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary {
            fighters: self
                .fighters
                .values()
                .map(|f| FighterSummary {
                    name: f.name.clone(),
                    actions: f.actions.len(),
                    combos: f.combos.len(),
                })
                .collect(),
            scripts: self.scripts.len(),
            max_turns: self.config.max_turns,
        }
    }
}

/// Declared entity counts for one fighter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FighterSummary {
    /// Fighter name.
    pub name: String,
    /// Number of atomic actions.
    pub actions: usize,
    /// Number of combos.
    pub combos: usize,
}

/// Declared entity counts for a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramSummary {
    /// One entry per fighter, in library order.
    pub fighters: Vec<FighterSummary>,
    /// Number of `turno` blocks, shadowed ones included.
    pub scripts: usize,
    /// Configured round limit.
    pub max_turns: u32,
}

impl ProgramSummary {
    /// Looks up the counts for one fighter.
    #[must_use]
    pub fn fighter(&self, name: &str) -> Option<&FighterSummary> {
        self.fighters.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fighters: {}", self.fighters.len())?;
        for fighter in &self.fighters {
            writeln!(
                f,
                "  {}: {} actions, {} combos",
                fighter.name, fighter.actions, fighter.combos
            )?;
        }
        writeln!(f, "turn scripts: {}", self.scripts)?;
        write!(f, "max turns: {}", self.max_turns)
    }
}
