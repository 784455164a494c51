//! Testing infrastructure for rtui integration tests.
//!
//! - `TestWorld`: isolated config and log locations for running the CLI
//! - `fixtures`: key sets and pre-seeded in-memory stores
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
