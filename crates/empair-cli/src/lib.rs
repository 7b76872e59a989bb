//! Employee pair CLI library.
//!
//! This crate provides the CLI interface: reading the input table, calling
//! the core pipeline, and rendering results.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
