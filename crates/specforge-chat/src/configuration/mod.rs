//! Configuration management for the chat client.
//!
//! Values are resolved from built-in defaults, an optional TOML config file, and
//! command-line flags, in that order of precedence.

mod config;

pub use config::*;
