use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Counters collected over one clustering run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Records read from the alignment file
    pub records_read: u64,

    /// Records without a reference sequence or alignment start. This includes
    /// records that name a reference but carry no alignment start.
    pub records_unplaced: u64,

    /// Records whose read name lacked the barcode pattern (skip mode only)
    pub records_malformed: u64,

    /// Clusters dropped for holding fewer positions than required
    pub clusters_filtered: u64,

    /// Clusters remaining in the table
    pub clusters: u64,

    /// Distinct positions summed over the remaining clusters
    pub positions: u64,
}

impl RunMetrics {
    /// Records that contributed a position to the table
    #[must_use]
    pub fn records_clustered(&self) -> u64 {
        self.records_read - self.records_unplaced - self.records_malformed
    }

    /// Write the metrics as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
