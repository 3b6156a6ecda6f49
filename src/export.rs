use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::history::History;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column names, matching the stored JSON field names.
pub const CSV_HEADER: [&str; 7] = [
    "wpm",
    "rawWpm",
    "accuracy",
    "errors",
    "mode",
    "date",
    "timestamp",
];

/// Write history as CSV, newest first. The header row is always written.
pub fn write_csv<W: Write>(history: &History, out: W) -> Result<usize, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for result in history.entries() {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(history.len())
}

/// Export history to a file, creating parent directories as needed.
pub fn export_history<P: AsRef<Path>>(history: &History, path: P) -> Result<usize, ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let written = write_csv(history, File::create(path)?)?;
    log::info!("exported {written} results to {}", path.display());
    Ok(written)
}
