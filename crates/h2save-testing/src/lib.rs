//! Testing infrastructure for h2save tests.
//!
//! - `fixtures`: synthetic savefiles built byte by byte
//! - `decoders`: scripted decode capabilities for pipeline tests
//! - `world`: isolated directories for running the CLI binary

pub mod decoders;
pub mod fixtures;
pub mod world;

pub use decoders::ScriptedDecoder;
pub use fixtures::{Lua, SavefileBuilder, nested_state, nested_table_blob};
pub use world::{CliResult, TestWorld};
