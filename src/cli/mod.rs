//! `stampcut` command line.
//!
//! A run either extracts stamps into `--output-dir` or, with `--analyze`,
//! prints per-cell foreground counts without writing anything. Processing
//! settings and the stamp list come from the flags, or from a `--manifest`
//! JSON file when one is given; input, output, report and logging flags
//! always come from the command line.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
