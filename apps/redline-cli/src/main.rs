//! Redline CLI
//!
//! Compares two plain-text contract versions and prints the result as JSON,
//! an HTML redline or a text report. Logs go to stderr so stdout can be piped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use redline_engine::{render, Comparison, DocumentInput, EngineConfig, RedlineEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full comparison result as pretty-printed JSON
    Json,
    /// Redline document with inline insertions and deletions
    Html,
    /// Plain-text summary report
    Report,
}

#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(version, about = "Compare two versions of a legal document and assess the risk of each change")]
struct Args {
    /// Original (baseline) document, UTF-8 text
    original: PathBuf,

    /// Revised document, UTF-8 text
    revised: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Display name for the original document (defaults to the file name)
    #[arg(long)]
    original_name: Option<String>,

    /// Display name for the revised document (defaults to the file name)
    #[arg(long)]
    revised_name: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = RedlineEngine::new(config).context("Invalid engine configuration")?;
    tracing::debug!(config = ?engine.config(), "engine configured");

    let original = read_document(&args.original)?;
    let revised = read_document(&args.revised)?;

    let original_name = display_name(args.original_name.as_deref(), &args.original);
    let revised_name = display_name(args.revised_name.as_deref(), &args.revised);

    let comparison = engine.compare_documents(
        DocumentInput::named(&original_name, &original),
        DocumentInput::named(&revised_name, &revised),
    );

    let rendered = format_output(&comparison, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Wrote {:?} output to {}", args.format, path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn display_name(explicit: Option<&str>, path: &Path) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.display().to_string())
}

fn format_output(comparison: &Comparison, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&comparison.result)
                .context("Failed to serialize comparison result")?;
            json.push('\n');
            json
        }
        OutputFormat::Html => {
            render::render_html(&comparison.result, &comparison.revised_segments)
        }
        OutputFormat::Report => render::render_report(&comparison.result),
    };
    Ok(output)
}
