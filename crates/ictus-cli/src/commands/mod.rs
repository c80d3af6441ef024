//! Command implementations
//!
//! Each subcommand lives in its own module and exposes a `run` entry point
//! returning `Result<()>` so `main` can map errors to exit codes.

pub(crate) mod dashboard;
pub(crate) mod serve;
pub(crate) mod train;
