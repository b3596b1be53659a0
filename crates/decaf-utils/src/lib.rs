//! Project-level helpers for the Decaf compiler.

mod config;

pub use config::{CONFIG_FILE, Config, Package};
