use thiserror::Error;
use tracing::{debug, warn};

use crate::core::position::Position;
use crate::core::table::ClusterTable;
use crate::parsing::alignment::{AlignmentRecord, ParseError};
use crate::parsing::barcode::{BarcodeError, BarcodeExtractor};
use crate::pipeline::metrics::RunMetrics;

/// Placeholder SAM uses for a missing read name
const MISSING_NAME: &str = "*";

const PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read alignment records: {0}")]
    Source(#[from] ParseError),

    #[error("Record {record}: {source}")]
    MalformedName {
        /// 1-based record number in the input
        record: u64,
        #[source]
        source: BarcodeError,
    },
}

/// What to do with a record whose read name lacks the barcode pattern
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MalformedNameHandling {
    /// Stop the run with an error
    #[default]
    Abort,
    /// Log a warning and leave the record out of every cluster
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub malformed_names: MalformedNameHandling,
}

/// The table built by a run together with its counters
#[derive(Debug, Default)]
pub struct ClusterRun {
    pub table: ClusterTable,
    pub metrics: RunMetrics,
}

/// Groups alignment positions into clusters keyed by read-name barcodes
pub struct ClusteringEngine {
    extractor: BarcodeExtractor,
    config: EngineConfig,
}

impl ClusteringEngine {
    #[must_use]
    pub fn new(extractor: BarcodeExtractor, config: EngineConfig) -> Self {
        Self { extractor, config }
    }

    /// Consume `records` in order, adding each record's position to the cluster
    /// for its barcodes.
    ///
    /// Records without a reference name or alignment start are counted and
    /// skipped. The metrics' cluster and position counts reflect the table as
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Source` on the first record that cannot be
    /// decoded, or `PipelineError::MalformedName` for a read name without
    /// barcodes when configured to abort.
    pub fn cluster<I>(&self, records: I) -> Result<ClusterRun, PipelineError>
    where
        I: IntoIterator<Item = Result<AlignmentRecord, ParseError>>,
    {
        let mut run = ClusterRun::default();

        for result in records {
            let record = result?;
            run.metrics.records_read += 1;
            let record_number = run.metrics.records_read;

            if record_number % PROGRESS_INTERVAL == 0 {
                debug!(
                    records = record_number,
                    clusters = run.table.len(),
                    "Processed records"
                );
            }

            let name = record.query_name.as_deref().unwrap_or(MISSING_NAME);
            let key = match self.extractor.extract_key(name) {
                Ok(key) => key,
                Err(source) => match self.config.malformed_names {
                    MalformedNameHandling::Abort => {
                        return Err(PipelineError::MalformedName {
                            record: record_number,
                            source,
                        });
                    }
                    MalformedNameHandling::Skip => {
                        warn!(record = record_number, name = %name, "Read name has no barcodes, skipping");
                        run.metrics.records_malformed += 1;
                        continue;
                    }
                },
            };

            let (Some(chromosome), Some(start)) = (record.reference_name, record.reference_start)
            else {
                debug!(record = record_number, name = %name, "Unplaced record, skipping");
                run.metrics.records_unplaced += 1;
                continue;
            };

            run.table.add_position(key, Position::new(chromosome, start));
        }

        run.metrics.clusters = run.table.len() as u64;
        run.metrics.positions = run.table.total_positions() as u64;

        Ok(run)
    }
}

impl ClusterRun {
    /// Drop clusters with fewer than `min_positions` positions, keeping the
    /// metrics in step with the table.
    pub fn filter_min_positions(&mut self, min_positions: usize) {
        let removed = self.table.retain_min_positions(min_positions);
        if removed > 0 {
            debug!(removed, min_positions, "Filtered small clusters");
        }
        self.metrics.clusters_filtered += removed as u64;
        self.metrics.clusters = self.table.len() as u64;
        self.metrics.positions = self.table.total_positions() as u64;
    }
}
