//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use numerus_core::rules::builtin;
use numerus_core::PluralRules;

pub mod generate;

use generate::{OutputFormat, RuleType};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate samples for the built-in plural rules
    Generate(generate::GenerateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Generate(args) => args.execute(),
            Commands::List { subcommand } => {
                let stdout = std::io::stdout();
                subcommand.write_to(&mut stdout.lock())
            }
        }
    }
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in rule families with their locales and keywords
    Families {
        /// Rule type to list
        #[arg(short = 't', long = "type", value_enum, default_value = "all")]
        rule_type: RuleType,
    },

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Write the listing
    pub fn write_to(&self, out: &mut impl std::io::Write) -> Result<()> {
        match self {
            ListCommands::Families { rule_type } => {
                for &kind in rule_type.kinds() {
                    for family in builtin::families(kind) {
                        writeln!(
                            out,
                            "{}\t{}\t{}",
                            kind,
                            family.locales.join(", "),
                            family.keywords().join(", ")
                        )?;
                    }
                }
            }
            ListCommands::Formats => {
                for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown] {
                    let value = clap::ValueEnum::to_possible_value(&format);
                    if let Some(value) = value {
                        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
                        writeln!(out, "{:<10} {}", value.get_name(), help)?;
                    }
                }
            }
        }
        Ok(())
    }
}
