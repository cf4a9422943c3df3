//! Command-line interface for barcode-clusters.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **cluster**: Group the positions of a BAM/SAM file by read-name barcodes
//!
//! ## Usage
//!
//! ```text
//! # Three barcodes per read name
//! barcode-clusters cluster sample.bam clusters.txt -n 3
//!
//! # Pipe from samtools, skipping reads without barcodes
//! samtools view -b -q 20 sample.bam | barcode-clusters cluster - clusters.txt -n 3 --malformed-names skip
//! ```

use clap::{Parser, Subcommand};

pub mod cluster;

#[derive(Parser)]
#[command(name = "barcode-clusters")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Group alignment positions into clusters by read-name barcodes")]
#[command(
    long_about = "barcode-clusters groups the records of a BAM/SAM file by the barcodes embedded in their read names.\n\nRead names must carry the barcodes after a double colon, e.g. READ::[AAA][BBB][CCC].\nFor each distinct barcode combination the distinct alignment positions are written as one line:\n  AAA.BBB.CCC<TAB>chr1:1000<TAB>chr2:52..."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group alignment positions by the barcodes in each read name
    Cluster(cluster::ClusterArgs),
}
