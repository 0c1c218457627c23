//! publish: copy build artifacts to declared destinations
//!
//! Settings come from a TOML file and are merged in layers (defaults, file,
//! destination, environment, command line) before anything is copied.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
