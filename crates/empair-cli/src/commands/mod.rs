//! CLI subcommand implementations.

pub mod input;
pub mod merge;
pub mod pair;
pub mod validate;
