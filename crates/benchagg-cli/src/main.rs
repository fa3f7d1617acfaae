//! benchagg - Benchmark run aggregator CLI
//!
//! Scores every submitted result file in an input directory and writes one
//! Markdown comparison report per cohort (spec reference, target model,
//! API style) into an output directory.
//!
//! Report paths are printed on stdout; warnings and progress go to stderr.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

use benchagg_core::batch::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use benchagg_core::{run_batch, AggregateConfig, BatchSummary};

#[derive(Parser, Debug)]
#[command(name = "benchagg")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Aggregate and compare benchmark results", long_about = None)]
struct Cli {
    /// Directory containing result files
    #[arg(long, env = "BENCHAGG_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Output directory for compiled reports
    #[arg(long, env = "BENCHAGG_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Only aggregate results for this spec version
    #[arg(long, env = "BENCHAGG_SPEC_VERSION")]
    spec_version: Option<String>,

    /// Also write a JSON artifact next to every report
    #[arg(long)]
    emit_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> AggregateConfig {
        AggregateConfig {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            spec_version: self.spec_version.clone(),
            emit_json: self.emit_json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    benchagg_core::init_tracing(cli.json, level);

    let config = cli.config();
    let summary = run_batch(&config)?;
    print_summary(&config, &summary);
    Ok(())
}

fn print_summary(config: &AggregateConfig, summary: &BatchSummary) {
    for path in &summary.written {
        println!("{}", path.display());
    }

    let stats = &summary.stats;
    info!(
        files = stats.files_seen,
        rejected = stats.files_rejected,
        reports = stats.reports_written,
        output_dir = %config.output_dir.display(),
        "aggregation complete"
    );
}
