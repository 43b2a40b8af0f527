//! Luchadores - Scripted turn-based combat
//!
//! This crate re-exports all layers of the Luchadores system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: luchadores_runtime    - Session loading, CLI
//! Layer 3: luchadores_debug      - Event formatting, filtering, statistics
//! Layer 2: luchadores_engine     - Fighter instances, combat executor, event log
//! Layer 1: luchadores_language   - Lexer, parser, AST, validation, pretty-printer
//! Layer 0: luchadores_foundation - Error types
//! ```
//!
//! # Example
//!
//! ```
//! let source = "
//!     luchador Rex {
//!         stats(hp=100, st=50);
//!         acciones { golpe: puño(daño=20, costo=10); }
//!         combos { doble(st_req=20) { puño, puño } }
//!     }
//!     luchador Tom {
//!         stats(hp=100, st=50);
//!         acciones { golpe: puño(daño=15, costo=5); }
//!         combos { doble(st_req=10) { puño, puño } }
//!     }
//!     simulacion {
//!         config { luchadores: Rex vs Tom; inicia: Rex; turnos_max: 2; }
//!         pelea { turno Rex { usa puño; } turno Tom { usa puño; } }
//!     }
//! ";
//! let program = luchadores::language::parse(source).unwrap();
//! let (_log, result) = luchadores::engine::run(&program).unwrap();
//! assert_eq!(result.outcome.winner(), Some("Rex"));
//! ```

pub use luchadores_debug as debug;
pub use luchadores_engine as engine;
pub use luchadores_foundation as foundation;
pub use luchadores_language as language;
pub use luchadores_runtime as runtime;
