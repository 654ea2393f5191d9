//! Command implementations and dispatch.

pub mod config;
pub mod init;
pub mod metadata;
pub mod structure;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands) -> ExitCode {
    let ctx = match &command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match command {
        Commands::Structure(cmd) => structure::run(&ctx, &cmd),
        Commands::Metadata(cmd) => metadata::run(&ctx, &cmd),
        Commands::Init(cmd) => init::run(&ctx, &cmd),
        Commands::Config => config::run(&ctx),
    }
}
