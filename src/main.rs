//! # face-compare CLI
//!
//! Command-line interface for the face comparison pipeline.
//!
//! ## Usage
//! ```bash
//! face-compare compare me.jpg passport.png --region eu-west-1
//! face-compare compare me.jpg passport.png --output json
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {}", style("✗").red().bold(), style(&error).red());
            ExitCode::FAILURE
        }
    }
}
