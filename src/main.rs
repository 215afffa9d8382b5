//! Block-Transform Codec CLI Tool
//!
//! A command-line utility for compressing images through the four
//! interchangeable 8×8 block transforms and comparing the results.

use clap::Parser;
use std::process::ExitCode;
use tilepress::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
