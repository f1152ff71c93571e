//! CLI module - argument parsing and subcommand handlers

pub mod apply;
mod args;
pub mod inspect;

pub use args::{Cli, Commands};
