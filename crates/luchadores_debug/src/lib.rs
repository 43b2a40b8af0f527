//! Event formatting, filtering, and statistics for Luchadores.
//!
//! This crate provides:
//! - `EventFormatter` - Human-readable and JSON rendering of combat records
//! - `EventFilter` - Selecting records by event type or fighter
//! - `CombatStats` - Per-fighter totals aggregated from an event log
//! - `FormatConfig` - One place to choose all of the above

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod filter;
pub mod format;
pub mod stats;

pub use config::{FormatConfig, OutputFormat};
pub use filter::{EventFilter, FilterError};
pub use format::{EventFormatter, HumanFormatter, JsonFormatter};
pub use stats::{CombatStats, FighterStats};
