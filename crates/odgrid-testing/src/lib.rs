//! Testing infrastructure for odgrid integration tests.
//!
//! Provides `TestWorld`, a fluent builder for isolated CLI runs: each
//! world owns a temp directory with its own config file and invokes the
//! binary in demo mode so tests never touch the network.

pub mod world;

pub use world::{CliResult, TestWorld};
