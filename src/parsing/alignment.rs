use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use noodles::sam::alignment::RecordBuf;
use noodles::{bam, sam};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Sam,
    Bam,
}

impl InputFormat {
    /// Infer the format from a file extension. Unknown extensions are rejected;
    /// a missing extension defaults to BAM.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for extensions other than
    /// `.sam` and `.bam`.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("sam") => Ok(Self::Sam),
            Some("bam") | None => Ok(Self::Bam),
            Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// The fields of an alignment record needed for clustering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentRecord {
    /// Reference sequence name, `None` for unplaced reads
    pub reference_name: Option<String>,

    /// 0-based alignment start, `None` for unplaced reads
    pub reference_start: Option<u64>,

    /// Query (read) name, `None` when stored as `*`
    pub query_name: Option<String>,
}

impl AlignmentRecord {
    pub fn new(
        reference_name: impl Into<String>,
        reference_start: u64,
        query_name: impl Into<String>,
    ) -> Self {
        Self {
            reference_name: Some(reference_name.into()),
            reference_start: Some(reference_start),
            query_name: Some(query_name.into()),
        }
    }

    fn from_record_buf(record: &RecordBuf, header: &sam::Header) -> Self {
        let reference_name = record
            .reference_sequence_id()
            .and_then(|id| header.reference_sequences().get_index(id))
            .map(|(name, _)| name.to_string());

        // noodles positions are 1-based
        let reference_start = record
            .alignment_start()
            .map(|position| usize::from(position) as u64 - 1);

        let query_name = record.name().map(|name| name.to_string());

        Self {
            reference_name,
            reference_start,
            query_name,
        }
    }
}

/// Object-safe view over the noodles BAM and SAM readers
trait ReadRecordBuf {
    fn read_record_buf(&mut self, header: &sam::Header, record: &mut RecordBuf)
        -> io::Result<usize>;
}

impl<R: BufRead> ReadRecordBuf for bam::io::Reader<R> {
    fn read_record_buf(
        &mut self,
        header: &sam::Header,
        record: &mut RecordBuf,
    ) -> io::Result<usize> {
        bam::io::Reader::read_record_buf(self, header, record)
    }
}

impl<R: BufRead> ReadRecordBuf for sam::io::Reader<R> {
    fn read_record_buf(
        &mut self,
        header: &sam::Header,
        record: &mut RecordBuf,
    ) -> io::Result<usize> {
        sam::io::Reader::read_record_buf(self, header, record)
    }
}

/// A single pass over the records of a BAM or SAM file.
///
/// Records are yielded in file order. Iteration stops after the first decode
/// error. The underlying file is closed when the reader is dropped.
pub struct AlignmentReader {
    inner: Box<dyn ReadRecordBuf>,
    header: sam::Header,
    record: RecordBuf,
    done: bool,
}

impl AlignmentReader {
    /// Open an alignment file. `-` reads from stdin. When `format` is `None`
    /// it is inferred from the file extension (stdin defaults to BAM).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened,
    /// `ParseError::Noodles` if the header cannot be read, or
    /// `ParseError::UnsupportedFormat` for unknown extensions.
    pub fn open(path: &Path, format: Option<InputFormat>) -> Result<Self, ParseError> {
        let is_stdin = path.as_os_str() == "-";

        let format = match format {
            Some(format) => format,
            None if is_stdin => InputFormat::Bam,
            None => InputFormat::from_path(path)?,
        };

        debug!(path = %path.display(), ?format, "Opening alignment file");

        match (format, is_stdin) {
            (InputFormat::Bam, true) => Self::from_bam(io::stdin()),
            (InputFormat::Bam, false) => Self::from_bam(File::open(path)?),
            (InputFormat::Sam, true) => Self::from_sam(BufReader::new(io::stdin())),
            (InputFormat::Sam, false) => Self::from_sam(File::open(path).map(BufReader::new)?),
        }
    }

    /// Read BAM-encoded records from `inner`
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header cannot be read.
    pub fn from_bam<R: io::Read + 'static>(inner: R) -> Result<Self, ParseError> {
        let mut reader = bam::io::Reader::new(inner);

        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        Ok(Self::with_header(Box::new(reader), header))
    }

    /// Read SAM text records from `inner`
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header cannot be read.
    pub fn from_sam<R: BufRead + 'static>(inner: R) -> Result<Self, ParseError> {
        let mut reader = sam::io::Reader::new(inner);

        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;

        Ok(Self::with_header(Box::new(reader), header))
    }

    fn with_header(inner: Box<dyn ReadRecordBuf>, header: sam::Header) -> Self {
        debug!(
            reference_sequences = header.reference_sequences().len(),
            "Read alignment header"
        );

        Self {
            inner,
            header,
            record: RecordBuf::default(),
            done: false,
        }
    }

    #[must_use]
    pub fn header(&self) -> &sam::Header {
        &self.header
    }
}

impl Iterator for AlignmentReader {
    type Item = Result<AlignmentRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.inner.read_record_buf(&self.header, &mut self.record) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(AlignmentRecord::from_record_buf(
                &self.record,
                &self.header,
            ))),
            Err(e) => {
                self.done = true;
                Some(Err(ParseError::Noodles(e.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    const SAM: &str = "@HD\tVN:1.6\tSO:unsorted
@SQ\tSN:chr1\tLN:1000
@SQ\tSN:chr2\tLN:1000
r1::[AA][BB]\t0\tchr1\t101\t60\t4M\t*\t0\t0\tACGT\tIIII
r2::[CC][DD]\t16\tchr2\t1\t60\t4M\t*\t0\t0\tACGT\tIIII
r3::[EE][FF]\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII
";

    fn read_all(text: &'static str) -> Vec<AlignmentRecord> {
        AlignmentReader::from_sam(Cursor::new(text.as_bytes()))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_read_sam_records() {
        let records = read_all(SAM);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0], AlignmentRecord::new("chr1", 100, "r1::[AA][BB]"));
        assert_eq!(records[1], AlignmentRecord::new("chr2", 0, "r2::[CC][DD]"));
    }

    #[test]
    fn test_unplaced_record() {
        let records = read_all(SAM);
        let unplaced = &records[2];
        assert!(unplaced.reference_name.is_none());
        assert!(unplaced.reference_start.is_none());
        assert_eq!(unplaced.query_name.as_deref(), Some("r3::[EE][FF]"));
    }

    #[test]
    fn test_header_is_exposed() {
        let reader = AlignmentReader::from_sam(Cursor::new(SAM.as_bytes())).unwrap();
        assert_eq!(reader.header().reference_sequences().len(), 2);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("a.SAM")).unwrap(),
            InputFormat::Sam
        );
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("a.bam")).unwrap(),
            InputFormat::Bam
        );
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("reads")).unwrap(),
            InputFormat::Bam
        );
        assert!(matches!(
            InputFormat::from_path(&PathBuf::from("reads.cram")),
            Err(ParseError::UnsupportedFormat(ext)) if ext == "cram"
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = AlignmentReader::open(&PathBuf::from("/nonexistent/reads.bam"), None);
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_open_invalid_bam() {
        let result = AlignmentReader::from_bam(Cursor::new(b"not a bam file".to_vec()));
        assert!(matches!(result, Err(ParseError::Noodles(_))));
    }
}
