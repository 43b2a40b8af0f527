//! Pretty-printer for programs.
//!
//! Converts a [`Program`] back to canonical Luchadores source. The output
//! parses back to an equivalent program (spans aside), and printing is
//! idempotent. Actions and combos come out in name order, one per line.
//!
//! # Example
//!
//! ```
//! use luchadores_language::{parse, pretty::pretty_print};
//!
//! let source = "
//!     luchador Rex { stats(hp=10, st=5); acciones { golpe: jab(daño=1); } combos { x(st_req=1) { jab } } }
//!     luchador Tom { stats(hp=10, st=5); acciones { bloqueo: guardia; } combos { y(st_req=1) { guardia } } }
//!     simulacion { config { luchadores: Rex vs Tom; inicia: Rex; turnos_max: 1; } pelea { turno Rex { usa jab; } } }
//! ";
//! let printed = pretty_print(&parse(source).unwrap());
//! assert!(printed.contains("golpe: jab(daño=1, costo=0);"));
//! ```

use std::fmt::Write;

use crate::ast::{ActionKind, AtomicAction, Combo, Fighter, Instruction, Program, TurnScript};

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Pretty-print a program to a string.
#[must_use]
pub fn pretty_print(program: &Program) -> String {
    pretty_print_with_config(program, PrettyConfig::default())
}

/// Pretty-print a program with custom configuration.
#[must_use]
pub fn pretty_print_with_config(program: &Program, config: PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(config);
    printer.print_program(program);
    printer.output
}

/// Pretty-printer state.
struct PrettyPrinter {
    config: PrettyConfig,
    output: String,
    indent_level: usize,
}

impl PrettyPrinter {
    fn new(config: PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn print_program(&mut self, program: &Program) {
        for fighter in program.fighters.values() {
            self.print_fighter(fighter);
            self.output.push('\n');
        }

        let config = &program.config;
        self.open("simulacion");
        self.open("config");
        self.line(&format!(
            "luchadores: {} vs {};",
            config.fighter_a, config.fighter_b
        ));
        self.line(&format!("inicia: {};", config.starting_fighter));
        self.line(&format!("turnos_max: {};", config.max_turns));
        self.close();
        self.open("pelea");
        for script in &program.scripts {
            self.print_script(script);
        }
        self.close();
        self.close();
    }

    fn print_fighter(&mut self, fighter: &Fighter) {
        self.open(&format!("luchador {}", fighter.name));
        self.line(&format!(
            "stats(hp={}, st={});",
            fighter.hp_max, fighter.stamina_max
        ));

        self.open("acciones");
        for action in fighter.actions.values() {
            let text = action_line(action);
            self.line(&text);
        }
        self.close();

        self.open("combos");
        for combo in fighter.combos.values() {
            let text = combo_line(combo);
            self.line(&text);
        }
        self.close();

        self.close();
    }

    fn print_script(&mut self, script: &TurnScript) {
        self.open(&format!("turno {}", script.fighter));
        self.print_instructions(&script.instructions);
        self.close();
    }

    fn print_instructions(&mut self, instructions: &[Instruction]) {
        for instruction in instructions {
            match instruction {
                Instruction::Use { name, .. } => self.line(&format!("usa {name};")),
                Instruction::Conditional {
                    condition,
                    then_block,
                    else_block,
                } => {
                    self.open(&format!("si ({condition})"));
                    self.print_instructions(then_block);
                    if else_block.is_empty() {
                        self.close();
                    } else {
                        self.indent_level -= 1;
                        self.line("} sino {");
                        self.indent_level += 1;
                        self.print_instructions(else_block);
                        self.close();
                    }
                }
            }
        }
    }

    /// Writes `header {` and indents.
    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.indent_level += 1;
    }

    /// Dedents and writes `}`.
    fn close(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line("}");
    }

    fn line(&mut self, text: &str) {
        let width = self.indent_level * self.config.indent_width;
        let _ = writeln!(self.output, "{:width$}{text}", "");
    }
}

fn action_line(action: &AtomicAction) -> String {
    if action.kind == ActionKind::Block {
        return format!("bloqueo: {};", action.name);
    }
    let mut attributes = vec![
        format!("daño={}", action.damage),
        format!("costo={}", action.cost),
    ];
    if let Some(height) = action.height {
        attributes.push(format!("altura={}", height.keyword()));
    }
    if let Some(shape) = action.shape {
        attributes.push(format!("forma={}", shape.keyword()));
    }
    if action.spinning {
        attributes.push("giratoria=si".to_string());
    }
    format!(
        "{}: {}({});",
        action.kind.keyword(),
        action.name,
        attributes.join(", ")
    )
}

fn combo_line(combo: &Combo) -> String {
    format!(
        "{}(st_req={}) {{ {} }}",
        combo.name,
        combo.stamina_cost,
        combo.steps.join(", ")
    )
}
