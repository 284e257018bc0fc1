//! Shared runtime helpers for the backend binaries and crates.
//! - `utils::logging`: tracing subscriber setup
//! - `env`: startup sanity checks on the filesystem layout

pub mod env;
pub mod utils;
