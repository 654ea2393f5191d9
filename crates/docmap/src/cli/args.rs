//! Clap argument definitions for the `docmap` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser, Debug)]
#[command(name = "docmap", version)]
#[command(about = "Map markdown documents into token-counted section trees and extract metadata")]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `docmap` subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a document into a section tree, write its JSON and section map
    Structure(StructureCommand),

    /// Extract tables, code blocks, benchmarks and key terms from a document
    Metadata(MetadataCommand),

    /// Create a commented .docmap.toml in the current directory
    Init(InitCommand),

    /// Show discovered configuration files and effective settings
    Config,
}

/// Arguments for `docmap structure`.
#[derive(Args, Debug, Clone)]
pub struct StructureCommand {
    /// Markdown file to parse
    pub file: PathBuf,

    /// Structure JSON output path [default: structure.json]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Section map output path [default: section_map.md]
    #[arg(short = 'm', long)]
    pub map: Option<PathBuf>,

    /// Embed each section's body text in the JSON output
    #[arg(long)]
    pub include_content: bool,

    /// Flag sections with fewer tokens than this [default: 400]
    #[arg(long)]
    pub lower: Option<usize>,

    /// Flag sections with more tokens than this [default: 900]
    #[arg(long)]
    pub upper: Option<usize>,
}

/// Arguments for `docmap metadata`.
#[derive(Args, Debug, Clone)]
pub struct MetadataCommand {
    /// Markdown file to scan
    pub file: PathBuf,

    /// Metadata JSON output path [default: metadata.json]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `docmap init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.docmap.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use docmap_config::{BandSettings, OutputSettings};

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    /// Catches drift between the help text and the configuration defaults.
    #[test]
    fn test_help_defaults_match_config() {
        let cmd = Cli::command();
        let band = BandSettings::default();
        let output = OutputSettings::default();

        let cases = [
            ("structure", "lower", band.lower.to_string()),
            ("structure", "upper", band.upper.to_string()),
            ("structure", "output", output.structure_file),
            ("structure", "map", output.map_file),
            ("metadata", "output", output.metadata_file),
        ];
        for (subcmd, arg, default) in cases {
            let help = get_arg_help(&cmd, subcmd, arg);
            assert!(
                help.contains(&format!("[default: {default}]")),
                "{subcmd} --{arg} help should mention {default}: {help}"
            );
        }
    }

    #[test]
    fn test_parse_structure_flags() {
        let cli = Cli::try_parse_from([
            "docmap",
            "-vv",
            "structure",
            "doc.md",
            "--lower",
            "10",
            "--include-content",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Structure(cmd) = cli.command else {
            panic!("expected structure command");
        };
        assert_eq!(cmd.file, PathBuf::from("doc.md"));
        assert_eq!(cmd.lower, Some(10));
        assert_eq!(cmd.upper, None);
        assert!(cmd.include_content);
    }
}
