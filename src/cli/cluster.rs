use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::parsing::alignment::{AlignmentReader, InputFormat};
use crate::parsing::barcode::BarcodeExtractor;
use crate::pipeline::engine::{ClusteringEngine, EngineConfig, MalformedNameHandling};
use crate::pipeline::writer::write_clusters;

#[derive(Args)]
pub struct ClusterArgs {
    /// Input alignment file (BAM or SAM)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output clusters file
    /// Use '-' for stdout
    #[arg(required = true)]
    pub output: PathBuf,

    /// Number of bracketed barcodes in each read name
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_barcodes: u32,

    /// Input format (inferred from the extension by default, BAM for stdin)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// How to handle read names without the expected barcodes
    #[arg(long, value_enum, default_value = "abort")]
    pub malformed_names: MalformedNameHandling,

    /// Only write clusters with at least this many distinct positions
    #[arg(long, default_value = "1")]
    pub min_positions: usize,

    /// Write run metrics as JSON to this path
    #[arg(long)]
    pub metrics: Option<PathBuf>,
}

/// Execute cluster subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read, a read name lacks barcodes
/// (unless skipping), or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClusterArgs, verbose: bool) -> anyhow::Result<()> {
    let extractor = BarcodeExtractor::new(args.num_barcodes as usize)?;

    let reader = AlignmentReader::open(&args.input, args.input_format)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    if verbose {
        eprintln!(
            "Reading {} ({} reference sequences), expecting {} barcodes per read name",
            args.input.display(),
            reader.header().reference_sequences().len(),
            extractor.num_barcodes(),
        );
    }

    let engine = ClusteringEngine::new(
        extractor,
        EngineConfig {
            malformed_names: args.malformed_names,
        },
    );

    let mut run = engine
        .cluster(reader)
        .with_context(|| format!("Failed to cluster {}", args.input.display()))?;

    if args.min_positions > 1 {
        run.filter_min_positions(args.min_positions);
    }

    write_clusters(&run.table, &args.output)?;

    let metrics = &run.metrics;
    info!(
        records = metrics.records_read,
        unplaced = metrics.records_unplaced,
        malformed = metrics.records_malformed,
        clusters = metrics.clusters,
        positions = metrics.positions,
        "Clustering complete"
    );

    if verbose {
        eprintln!(
            "Wrote {} clusters ({} positions) from {} records",
            metrics.clusters,
            metrics.positions,
            metrics.records_clustered(),
        );
        if metrics.records_unplaced > 0 {
            eprintln!("Skipped {} unplaced records", metrics.records_unplaced);
        }
        if metrics.records_malformed > 0 {
            eprintln!(
                "Skipped {} records without barcodes",
                metrics.records_malformed
            );
        }
    }

    if let Some(path) = &args.metrics {
        metrics
            .write_json(path)
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    }

    Ok(())
}
