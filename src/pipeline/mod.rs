//! The clustering run: stream records, group positions, write the table.
//!
//! 1. [`engine::ClusteringEngine`] consumes alignment records in file order,
//!    extracts each read's barcode key and adds its position to the matching
//!    cluster
//! 2. [`engine::ClusterRun::filter_min_positions`] optionally drops small
//!    clusters
//! 3. [`writer::write_clusters`] writes one line per cluster once the whole
//!    table has been built
//!
//! ## Output Format
//!
//! ```text
//! <barcode_key>\t<chr>:<coord>\t<chr>:<coord>\t...
//! ```
//!
//! Coordinates are 0-based. Line order and position order within a line are
//! unspecified.

pub mod engine;
pub mod metrics;
pub mod writer;
