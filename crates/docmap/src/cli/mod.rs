//! CLI support for the `docmap` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
