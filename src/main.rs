use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use modweave::core::ModuleAnalyzer;
use modweave::formatters::{FlatFormatter, NotebookFormatter};
use modweave::parsers::ParserFactory;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "modweave",
    version = "0.1.0",
    author = "modweave developers",
    about = "Flatten a multi-module source tree into one file or notebook in dependency order"
)]
struct Cli {
    /// Root of the source tree to flatten
    #[arg(short, long, value_name = "PATH", default_value = "src")]
    input: PathBuf,

    /// Flat source output file
    #[arg(short, long, value_name = "FILE", default_value = "colab_combined.py")]
    output: PathBuf,

    /// Notebook output file
    #[arg(short, long, value_name = "FILE", default_value = "colab_combined.ipynb")]
    notebook: PathBuf,

    /// Which artifacts to generate: both, flat, notebook
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Both)]
    format: OutputFormat,

    /// Source language of the tree
    #[arg(short, long, value_name = "LANG", default_value = "python")]
    language: String,

    /// Stamp the generation time into the header (output is no longer reproducible)
    #[arg(long)]
    timestamp: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Both,
    Flat,
    Notebook,
}

impl OutputFormat {
    fn notebook(self) -> bool {
        matches!(self, OutputFormat::Both | OutputFormat::Notebook)
    }

    fn flat(self) -> bool {
        matches!(self, OutputFormat::Both | OutputFormat::Flat)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        notebook,
        format,
        language,
        timestamp,
    } = cli;

    let start_time = Instant::now();

    let parser = ParserFactory::new().get_parser(language.trim())?;
    let analyzer = ModuleAnalyzer::with_parser(parser);
    let analysis = analyzer
        .analyze(&input)
        .with_context(|| format!("failed to analyze {}", input.display()))?;

    let mut flat = FlatFormatter::new(analyzer.into_parser());
    if timestamp {
        let now = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("failed to format generation timestamp")?;
        flat = flat.with_timestamp(now);
    }
    let formatter = NotebookFormatter::new(flat);

    if format.notebook() {
        formatter
            .format_to_file(&analysis, &notebook)
            .with_context(|| format!("failed to write {}", notebook.display()))?;
        println!("Generated notebook: {}", notebook.display());
    }

    if format.flat() {
        formatter
            .flat()
            .format_to_file(&analysis, &output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Generated Python file: {}", output.display());
    }

    tracing::info!(
        units = analysis.modules.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "done"
    );

    Ok(())
}
