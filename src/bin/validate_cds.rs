use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cdscheck::cli;
use cdscheck::codon::GeneticCodes;
use cdscheck::config::TranslatorConfig;
use cdscheck::input::{self, BatchInput};
use cdscheck::sequence::RemoteSequences;
use cdscheck::translator::CdsTranslator;

const DEFAULT_LOG_FILTER: &str = "validate_cds=warn,cdscheck=warn";

#[derive(Parser)]
#[command(
    name = "validate_cds",
    about = "Translate CDS features and reconcile them with their asserted translations"
)]
struct Cli {
    /// Batch of entries and CDS features (JSON, optionally gzip-compressed)
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output report path (JSON); written to stdout when omitted
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Path to the JSON translator configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// FASTA file (optionally gzip-compressed) of sequences referenced by remote locations
    #[arg(short = 'r', long = "remote")]
    remote: Option<PathBuf>,

    /// Apply fixes to features, overriding the configuration
    #[arg(long = "fix")]
    fix: bool,
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn read_input(path: &Path) -> Result<BatchInput> {
    let reader = open(path)?;
    let parsed = if is_gzip(path) {
        input::parse_batch_gz(reader)
    } else {
        input::parse_batch(reader)
    };
    parsed.with_context(|| format!("failed to parse input: {}", path.display()))
}

fn read_remote(path: &Path) -> Result<RemoteSequences> {
    let reader = open(path)?;
    let remote = if is_gzip(path) {
        RemoteSequences::from_fasta_gz(reader)
    } else {
        RemoteSequences::from_fasta(reader)
    };
    remote.with_context(|| format!("failed to read remote sequences: {}", path.display()))
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?,
        )
        .init();

    cli::banner("Validate CDS");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let mut config = match &cli_args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::default(),
    };
    if cli_args.fix {
        config.fix_mode = true;
    }

    let codes = GeneticCodes::ncbi();
    config.validate(&codes)?;

    if let Some(path) = &cli_args.config {
        cli::kv("Config", &path.display().to_string());
    }
    cli::kv("Input", &cli_args.input.display().to_string());
    cli::kv("Mode", if config.fix_mode { "fix" } else { "report" });
    cli::kv("Default table", &config.default_translation_table.to_string());
    if !config.disabled_fixes.is_empty() {
        let names: Vec<&str> = config.disabled_fixes.iter().map(|f| f.name()).collect();
        cli::kv("Disabled fixes", &names.join(", "));
    }

    eprintln!();

    // ── Load ─────────────────────────────────────────────
    cli::section("Input");

    let remote = match &cli_args.remote {
        Some(path) => {
            let remote = read_remote(path)?;
            cli::kv("Remote sequences", &remote.len().to_string());
            remote
        }
        None => RemoteSequences::new(),
    };

    let batch = read_input(&cli_args.input)?;
    let num_features: usize = batch.entries.iter().map(|e| e.features.len()).sum();
    cli::kv("Entries", &batch.entries.len().to_string());
    cli::kv("Features", &num_features.to_string());

    eprintln!();

    // ── Translate ────────────────────────────────────────
    cli::section("Translation");

    let translator = CdsTranslator::new(&codes, config);
    let report = input::validate_batch(&batch, &translator, &remote);

    for entry in &report.entries {
        let accession = entry.accession.as_deref().unwrap_or("-");
        for feature in &entry.features {
            let context = format!("{accession} {}", feature.location);
            if let Some(error) = &feature.error {
                cli::warning(&format!("{context}: {error}"));
            }
            for message in &feature.messages {
                cli::message(&context, message);
            }
        }
    }

    let summary = report.summary;
    cli::kv("Valid", &summary.valid.to_string());
    cli::kv("Invalid", &summary.invalid.to_string());
    cli::kv("Fixed", &summary.fixed.to_string());
    if summary.failed > 0 {
        cli::warning(&format!("{} features could not be processed", summary.failed));
    } else {
        cli::success(&format!("{} features processed", summary.features));
    }

    // ── Output ───────────────────────────────────────────
    match &cli_args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            cli::kv("Report", &path.display().to_string());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    cli::print_summary(start);
    Ok(())
}
