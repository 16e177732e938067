//! pv-cli library
//!
//! Argument parsing and command execution for the `pv` binary, exported so
//! tests can drive commands against a temporary store.

mod app;
mod cli;
mod commands;
mod console_notifier;
mod error;
mod logger;


pub use app::{execute, open_store, run};
pub use cli::Cli;
pub use commands::Commands;
pub use console_notifier::ConsoleNotifier;
pub use error::{CliError, CliResult};
