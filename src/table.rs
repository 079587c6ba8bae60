//! CSV manifest export.
//!
//! Stage 2 of the pipeline. One header row, then one row per walker record in
//! walker order (root `photos`):
//!
//! ```text
//! filename,relative_path,full_path
//! pic.png,a/pic.png,photos/a/pic.png
//! "x,y.png","b/x,y.png","photos/b/x,y.png"
//! ```
//!
//! The table is written before any copy happens, so it never contains
//! `local_path`. Quoting follows the usual CSV rules: fields holding a comma,
//! a quote, or a line break are quoted.

use crate::types::ImageRecord;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub const HEADER: [&str; 3] = ["filename", "relative_path", "full_path"];

/// Write the table to any writer.
///
/// The header is written explicitly so an empty scan still yields a valid file.
pub fn write_table<W: Write>(records: &[ImageRecord], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the table to `path`, replacing any existing file.
pub fn export_table(records: &[ImageRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_table(records, io::BufWriter::new(file))
}
