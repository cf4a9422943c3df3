use std::io::{self, BufWriter, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::table::ClusterTable;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write clusters to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move finished output to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write one newline-terminated line per cluster. Returns the number of lines.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_lines<W: Write>(table: &ClusterTable, mut writer: W) -> io::Result<usize> {
    let mut count = 0;
    for line in table.lines() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write the table to `path`, or to stdout when `path` is `-`.
///
/// File output goes to a temporary file next to `path` that replaces `path`
/// only once every line has been written, so a failed run never leaves a
/// partial output file behind.
///
/// # Errors
///
/// Returns `WriteError::Io` if the output cannot be created or written, or
/// `WriteError::Persist` if the finished file cannot be moved into place.
pub fn write_clusters(table: &ClusterTable, path: &Path) -> Result<usize, WriteError> {
    let io_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        return write_lines(table, BufWriter::new(stdout.lock())).map_err(io_error);
    }

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // tempfile defaults to 0600; request the same mode as File::create so the
    // umask decides the final permissions
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    builder.permissions(std::fs::Permissions::from_mode(0o666));

    let mut temp = builder.tempfile_in(directory).map_err(io_error)?;
    let count = write_lines(table, BufWriter::new(temp.as_file_mut())).map_err(io_error)?;

    temp.persist(path).map_err(|e| WriteError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), clusters = count, "Wrote clusters");
    Ok(count)
}
