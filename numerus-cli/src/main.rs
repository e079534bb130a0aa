//! numerus command-line entry point

use anyhow::Result;
use clap::Parser;
use numerus_cli::commands::Commands;

/// Generate representative samples for plural categories
#[derive(Debug, Parser)]
#[command(name = "numerus", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["numerus", "generate", "--type", "ordinal", "-vv"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
    }
}
