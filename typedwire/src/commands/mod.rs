mod bake;
mod check;
mod completions;
mod generate;

use bake::BakeCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on request errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for typedwire_request::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "typedwire")]
#[command(version)]
#[command(about = "Generate typed serde envelopes for tagged unions")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one envelope from command-line arguments
    Generate(GenerateCommand),

    /// Generate every envelope listed in typedwire.toml
    Bake(BakeCommand),

    /// Validate typedwire.toml without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_counts_flags() {
        let cli = Cli::try_parse_from(["typedwire", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbosity(), 2);

        let cli = Cli::try_parse_from(["typedwire", "check", "-v"]).unwrap();
        assert_eq!(cli.verbosity(), 1);
    }
}
