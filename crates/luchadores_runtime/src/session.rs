//! Loading and running programs.
//!
//! A [`Session`] owns the engine and formatting configuration and takes a
//! program from source text (or a file) through parsing, validation, and
//! execution.

use std::fmt::Write as _;
use std::path::Path;

use luchadores_debug::FormatConfig;
use luchadores_engine::{CombatExecutor, CombatResult, EngineConfig, EventLog};
use luchadores_foundation::{Error, Result};
use luchadores_language::{Parsed, Program, Warning, parse_with_diagnostics, pretty};

// =============================================================================
// Configuration
// =============================================================================

/// Everything a session needs to run and render a combat.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Engine limits and event options.
    pub engine: EngineConfig,
    /// How results are rendered.
    pub format: FormatConfig,
}

impl SessionConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the engine configuration.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Builder method to set the output configuration.
    #[must_use]
    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }
}

// =============================================================================
// Loaded Program
// =============================================================================

/// A program that parsed, with its origin and diagnostics.
#[derive(Clone, Debug)]
pub struct Loaded {
    /// File path or other label the source came from.
    pub origin: String,
    /// The parsed program and its diagnostics.
    pub parsed: Parsed,
}

impl Loaded {
    /// Returns the program.
    #[must_use]
    pub fn program(&self) -> &Program {
        &self.parsed.program
    }

    /// Returns the validation warnings.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.parsed.warnings
    }
}

/// A finished combat.
#[derive(Clone, Debug)]
pub struct Combat {
    /// Every event, in order.
    pub log: EventLog,
    /// Final state and outcome.
    pub result: CombatResult,
}

// =============================================================================
// Session
// =============================================================================

/// Loads, runs, and renders programs under one configuration.
#[derive(Clone, Debug, Default)]
pub struct Session {
    config: SessionConfig,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Reads a source file as UTF-8 text.
    ///
    /// # Errors
    /// Returns an I/O error naming the path if it cannot be read.
    pub fn read_source(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), &e))
    }

    /// Reads and parses a source file.
    ///
    /// # Errors
    /// Returns an I/O, syntax, or semantic error.
    pub fn load_file(&self, path: &Path) -> Result<Loaded> {
        let source = Self::read_source(path)?;
        self.load_source(path.display().to_string(), &source)
    }

    /// Parses source text.
    ///
    /// # Errors
    /// Returns a syntax or semantic error.
    pub fn load_source(&self, origin: impl Into<String>, source: &str) -> Result<Loaded> {
        let origin = origin.into();
        let parsed = parse_with_diagnostics(source)?;
        let summary = parsed.program.summary();
        tracing::info!(
            %origin,
            fighters = summary.fighters.len(),
            scripts = summary.scripts,
            warnings = parsed.warnings.len(),
            "loaded program"
        );
        Ok(Loaded { origin, parsed })
    }

    /// Runs the combat a loaded program describes.
    ///
    /// # Errors
    /// Parsed programs always run; this only fails if the program was
    /// altered after loading to name fighters it does not declare.
    pub fn run(&self, loaded: &Loaded) -> Result<Combat> {
        let (log, result) = CombatExecutor::new(self.config.engine).run(loaded.program())?;
        tracing::info!(
            origin = %loaded.origin,
            events = log.len(),
            rounds = result.rounds_played,
            outcome = %result.outcome,
            "combat finished"
        );
        Ok(Combat { log, result })
    }

    /// Renders a finished combat as output lines.
    #[must_use]
    pub fn render(&self, combat: &Combat) -> Vec<String> {
        self.config.format.render(&combat.log, &combat.result)
    }

    /// Describes a loaded program without running it: declared counts,
    /// then one line per warning.
    #[must_use]
    pub fn check_report(loaded: &Loaded) -> String {
        let mut out = format!("{}\n{}", loaded.origin, loaded.program().summary());
        for warning in loaded.warnings() {
            let _ = write!(out, "\nwarning: {warning}");
        }
        for error in &loaded.parsed.lexical {
            let _ = write!(out, "\nwarning: {error}");
        }
        out
    }

    /// Prints a loaded program back as canonical source.
    #[must_use]
    pub fn canonical_source(loaded: &Loaded) -> String {
        pretty::pretty_print(loaded.program())
    }
}
