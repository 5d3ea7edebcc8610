//! CLI command handlers

pub mod commands;

pub use commands::{format, preview, ConfigOptions};
