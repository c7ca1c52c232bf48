//! Rhachet CLI
//!
//! Library half of the `rha` binary: command definition, config loading,
//! and dispatch, kept separate from `main` so commands can be driven from
//! tests with an in-memory output buffer.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod command;
mod config;
mod run;

pub use command::command;
pub use config::{load_config, DEFAULT_CONFIG_FILE};
pub use run::{run, Outcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
