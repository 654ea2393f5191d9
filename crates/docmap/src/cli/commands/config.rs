//! Implementation of `docmap config`.

use std::process::ExitCode;

use docmap_config::{discover_config_files, format_path_for_display};
use docmap_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows discovered configuration files, effective settings and warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let styler = &ctx.styler;
    let config = &ctx.config;

    println!("{}", styler.header("Configuration files"));
    let files = discover_config_files(&ctx.cwd);
    if files.is_empty() {
        println!("  {}", styler.dim("(none, using defaults)"));
    }
    for path in &files {
        println!("  {}", format_path_for_display(path, &ctx.cwd));
    }
    println!();

    let toml = match config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", styler.header("Effective settings"));
    print!("{}", Highlighter::new(*styler).highlight_toml(&toml));

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!();
        println!("{}", styler.header("Warnings"));
        for warning in &warnings {
            println!("  {}", styler.warning(&warning.to_string()));
        }
    }

    ExitCode::SUCCESS
}
