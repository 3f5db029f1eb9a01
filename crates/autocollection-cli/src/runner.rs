//! Argument parsing and pass execution

use std::path::PathBuf;

use anyhow::{Context, Result};
use autocollection_generator::{
    CompilationSnapshot, ConfigLoader, Contract, Diagnostic, GenerationError, GeneratorConfig,
    GeneratorSet,
};
use clap::Parser;
use tracing::{error, info};

use crate::sink::DirectorySink;

/// Synthesize collection companions for annotated partial classes
#[derive(Debug, Parser)]
#[command(name = "autocollection", version, about)]
pub struct Cli {
    /// Compilation snapshot (JSON, or YAML by extension)
    pub snapshot: PathBuf,

    /// Output directory; each contract writes to its own subdirectory
    #[arg(short, long, default_value = "generated")]
    pub out: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run every pass but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Tracing level for `--log-level`
    pub fn level(&self) -> tracing::Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }

    fn load_config(&self) -> Result<GeneratorConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        loader.load().context("Failed to load configuration")
    }
}

/// What a CLI run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files written (or that would be written), per contract
    pub written: Vec<(Contract, Vec<PathBuf>)>,
    /// Candidate diagnostics of every contract
    pub diagnostics: Vec<Diagnostic>,
    /// Contracts whose pass failed, with the reason
    pub failures: Vec<(Contract, String)>,
}

impl RunSummary {
    /// Whether any pass failed or any candidate was rejected
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Load the snapshot and run every contract over it
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let config = cli.load_config()?;
    let snapshot = CompilationSnapshot::load(&cli.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", cli.snapshot.display()))?;
    info!(
        "Loaded {} declarations from {}",
        snapshot.declarations.len(),
        cli.snapshot.display()
    );

    let set = GeneratorSet::with_config(config).context("Failed to prepare generators")?;
    let mut summary = RunSummary::default();

    for generator in set.generators() {
        let contract = generator.spec().contract;
        let mut sink = DirectorySink::new(cli.out.join(contract.name()), cli.dry_run);

        match generator.execute(&snapshot, &mut sink) {
            Ok(report) => {
                summary.diagnostics.extend(report.diagnostics);
                summary.written.push((contract, sink.written().to_vec()));
            }
            Err(e) => {
                error!("{} pass failed: {}", contract, e);
                summary.failures.push((contract, e.to_string()));
                if let GenerationError::Configuration { candidate_faults, .. } = e {
                    summary.diagnostics.extend(candidate_faults);
                }
            }
        }
    }

    Ok(summary)
}
