//! blackroad: product catalog CLI
//!
//! Layers, innermost first:
//! - `domain`: the catalog and its rules
//! - `application`: services rendering command output
//! - `infrastructure`: service wiring
//! - `cli`: argument parsing, dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

/// Version printed by `blackroad version` and the help banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
