//! Terminal presentation layer: an interactive (or scripted) shell that
//! feeds user input into the ledger and renders its aggregates.

pub mod commands;
pub mod context;
pub mod errors;
pub mod io;
pub mod output;
pub mod registry;
pub mod shell;
pub mod ui;

pub use context::{CliMode, ShellContext};
pub use errors::{CliError, CommandError};
pub use shell::run_cli;
