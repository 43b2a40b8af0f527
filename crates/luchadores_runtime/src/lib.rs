//! Session loading and command-line support for Luchadores.
//!
//! This crate provides:
//! - [`Session`] - Load, run, and render programs under one configuration
//! - [`SessionConfig`] - Engine and output settings together
//! - [`error_report`] - Console rendering of parse and load errors
//!
//! The `luchadores` binary is a thin wrapper around these.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod report;
pub mod session;

pub use report::error_report;
pub use session::{Combat, Loaded, Session, SessionConfig};
