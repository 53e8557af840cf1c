//! `stampcut` binary: cuts one stamp sheet into fixed-size transparent icons.
//!
//! Exits non-zero when the sheet cannot be loaded or the configuration is
//! invalid; per-stamp failures are only reported in the summary.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run(cli::CliArgs::parse())
}
