//! Parsers for the inputs of a clustering run.
//!
//! - **Alignment files**: [`alignment::AlignmentReader`] streams BAM or SAM
//!   records through `noodles`, exposing only the reference name, 0-based
//!   alignment start and query name of each record
//! - **Read-name barcodes**: [`barcode::BarcodeExtractor`] pulls the bracketed
//!   barcodes out of read names
//!
//! ## Read Name Format
//!
//! Barcodes are appended to the original read name after a double colon, each
//! enclosed in brackets:
//!
//! ```text
//! ORIGINAL_READ_NAME::[Barcode1][Barcode2][Barcode3]
//! ```
//!
//! The barcodes are joined with `.` to form the cluster key, e.g.
//! `Barcode1.Barcode2.Barcode3`.

pub mod alignment;
pub mod barcode;
