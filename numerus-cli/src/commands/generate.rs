//! Generate command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use numerus_core::{builtin_groups, GenerationReport, ReportGenerator, RuleKind};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Rule type to generate samples for
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub rule_type: RuleType,

    /// Only locales containing a match of this regular expression
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "NUMERUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Record rule/observation mismatches as warnings instead of aborting
    #[arg(long)]
    pub warn_mismatches: bool,

    /// Generate rule groups in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for parallel generation
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Kind and locales header, then one line per keyword
    Text,
    /// JSON array of family reports
    Json,
    /// One markdown table per family
    Markdown,
}

/// Rule types selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleType {
    /// Counting forms
    Cardinal,
    /// Ranking forms
    Ordinal,
    /// Cardinal, then ordinal
    All,
}

impl RuleType {
    /// Rule kinds in generation order
    pub fn kinds(&self) -> &'static [RuleKind] {
        match self {
            RuleType::Cardinal => &[RuleKind::Cardinal],
            RuleType::Ordinal => &[RuleKind::Ordinal],
            RuleType::All => &RuleKind::ALL,
        }
    }
}

/// Compile the locale filter; a locale is kept when the pattern matches anywhere in it
pub fn locale_filter(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CliError::InvalidFilter(e.to_string()).into())
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting sample generation");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let format = self.resolve_format(&config)?;
        let filter = self.filter.as_deref().map(locale_filter).transpose()?;
        let generator = self.generator(&config)?;

        let passes: Vec<(RuleKind, _)> = self
            .rule_type
            .kinds()
            .iter()
            .map(|&kind| {
                let groups = builtin_groups(kind, |locale| {
                    filter.as_ref().map_or(true, |re| re.is_match(locale))
                });
                (kind, groups)
            })
            .collect();

        let total: usize = passes.iter().map(|(_, groups)| groups.len()).sum();
        if total == 0 {
            return Err(CliError::NoMatchingLocales(self.filter.clone().unwrap_or_default()).into());
        }

        // Stdout carries the report, so the bar only shows when writing to a file
        let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
        progress.init_groups(total as u64);

        let mut report = GenerationReport::default();
        for (kind, groups) in &passes {
            progress.pass_started(kind.as_str());
            let pass = generator
                .generate(groups)
                .with_context(|| format!("Failed to generate {kind} samples"))?;
            report.extend(pass);
            progress.groups_completed(groups.len() as u64);
        }
        progress.finish();

        let mut formatter =
            create_formatter(format, self.output.as_deref(), config.output.pretty_json)?;
        for family in &report.families {
            formatter.format_family(family)?;
        }
        formatter.finish()?;

        print_summary(&report)
    }

    fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format: {}",
                config.output.default_format
            ))
            .into()
        })
    }

    fn generator(&self, config: &CliConfig) -> Result<ReportGenerator> {
        let generator_config = config.generator_config(self.warn_mismatches)?;
        let threads = match self.threads.unwrap_or(config.performance.worker_threads) {
            0 => num_cpus::get(),
            n => n,
        };
        log::debug!("parallel={}, threads={}", self.parallel, threads);

        Ok(ReportGenerator::new(generator_config)
            .parallel(self.parallel)
            .thread_count(Some(threads)))
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }

        Ok(())
    }
}

fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
    pretty_json: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write + Send + Sync> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    })
}

/// Diagnostics and failures go to stderr; any failure fails the command
fn print_summary(report: &GenerationReport) -> Result<()> {
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    for failure in &report.failures {
        eprintln!("***Failure: {failure}");
    }
    if report.failure_count() > 0 {
        return Err(CliError::GenerationFailures(report.failure_count()).into());
    }
    Ok(())
}
