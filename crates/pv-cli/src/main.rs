//! pv - profile store maintenance CLI
//!
//! Reads and repairs the per-user profile records under the store root.
//! Every command prints JSON on stdout; errors go to stderr with exit code 1.
//!
//! # Examples
//!
//! ```bash
//! # List users
//! pv list --pretty
//!
//! # Create a user
//! pv create --name Alice --password s3cret
//!
//! # Read and write a preference
//! pv get <user-id> intromusic
//! pv set <user-id> intromusic 1
//!
//! # Migrate every record against the catalog
//! pv migrate --root ./dynamic
//! ```

use pv_cli::{Cli, run};

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.recovery_hint() {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
