mod args;
mod commands;
mod handlers;
pub mod logging;
mod tui;
mod views;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
