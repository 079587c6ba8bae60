//! Shared types passed between pipeline stages.
//!
//! Records flow walk → table → materialize → gallery. The table serializes
//! [`ImageRecord`] directly, so its field order is the CSV column order.

use serde::Serialize;
use std::path::PathBuf;

/// An image file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Base name, e.g. `pic.png`.
    pub filename: String,
    /// Path relative to the scan root, platform separators.
    pub relative_path: String,
    /// Scan root joined with the relative path, leading `./` dropped.
    pub full_path: String,
    /// The file on disk. The string fields above are lossy for names that
    /// are not valid UTF-8; copies always read from here.
    #[serde(skip)]
    pub source: PathBuf,
}

/// An [`ImageRecord`] after its copy has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedImageRecord {
    pub record: ImageRecord,
    /// Link target relative to the gallery document, `/` separated.
    pub local_path: String,
}

/// Progress reported by the pipeline stages as they run.
///
/// Stages never print; they hand events to a callback and the binary decides
/// how to display them (see [`crate::output`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ScanStarted { root: PathBuf },
    DirectoryIgnored { path: PathBuf },
    ImageFound { path: PathBuf },
    ScanFinished { count: usize },
    TableWritten { path: PathBuf, rows: usize },
    CopyStarted { dir: PathBuf },
    ImageCopied { relative_path: String, dest: PathBuf },
    /// Source and destination are the same file; nothing was written.
    CopySkipped { dest: PathBuf },
    GalleryWritten { path: PathBuf, rows: usize },
}
