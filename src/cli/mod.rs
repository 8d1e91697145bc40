// Command-line entry point
pub mod commands;

pub use commands::*;
