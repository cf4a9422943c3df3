//! # barcode-clusters
//!
//! A library for grouping alignment records by the molecular barcodes embedded
//! in their read names.
//!
//! Barcoding protocols often tag every read with a combination of barcodes,
//! stored in the read name as `READ::[Barcode1][Barcode2]...`. Reads sharing a
//! barcode combination come from the same molecule or cluster, and the set of
//! distinct positions where those reads aligned is the cluster's positional
//! fingerprint. Repeated alignments to the same position (e.g. PCR duplicates)
//! collapse to a single entry.
//!
//! ## Example
//!
//! ```rust,no_run
//! use barcode_clusters::{AlignmentReader, BarcodeExtractor, ClusteringEngine, EngineConfig};
//! use std::path::Path;
//!
//! let reader = AlignmentReader::open(Path::new("sample.bam"), None).unwrap();
//! let extractor = BarcodeExtractor::new(3).unwrap();
//!
//! let engine = ClusteringEngine::new(extractor, EngineConfig::default());
//! let run = engine.cluster(reader).unwrap();
//!
//! for line in run.table.lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Positions, clusters and the cluster table
//! - [`parsing`]: BAM/SAM record reading and read-name barcode extraction
//! - [`pipeline`]: The streaming clustering run and output writing
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use core::{Cluster, ClusterTable, Position, TableError};
pub use parsing::alignment::{AlignmentReader, AlignmentRecord, InputFormat};
pub use parsing::barcode::BarcodeExtractor;
pub use pipeline::engine::{ClusterRun, ClusteringEngine, EngineConfig, MalformedNameHandling};
