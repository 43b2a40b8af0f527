//! Cross-layer integration tests for Luchadores
//!
//! Tests that verify correct interaction between multiple crates.

mod demos;
mod pipeline;
