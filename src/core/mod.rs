//! Core data types for barcode clustering.
//!
//! - [`Position`]: a genomic coordinate (reference name + 0-based offset)
//! - [`Cluster`]: the distinct positions seen for one barcode combination
//! - [`ClusterTable`]: barcode key to cluster mapping with lazy creation
//!
//! ## Ordering
//!
//! Neither clusters nor the table define an iteration order. Anything that
//! compares rendered output must treat lines, and the positions within a line,
//! as unordered collections.

pub mod cluster;
pub mod position;
pub mod table;

pub use cluster::Cluster;
pub use position::Position;
pub use table::{ClusterTable, TableError};
