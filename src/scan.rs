//! Directory walking and image discovery.
//!
//! Stage 1 of the pipeline. Walks a directory tree and returns an
//! [`ImageRecord`] for every file whose extension marks it as an image.
//!
//! ## Traversal
//!
//! ```text
//! root/
//! ├── a/
//! │   ├── pic.png            → a/pic.png
//! │   └── b/
//! │       └── pic.png        → a/b/pic.png
//! ├── node_modules/          → ignored, never listed
//! │   └── skip.jpg
//! └── README.md              → not an image
//! ```
//!
//! - The walk is iterative (`walkdir` keeps its own stack), so deep trees do
//!   not grow the call stack.
//! - Directories whose base name is in `scan.ignore_dirs` are skipped at any
//!   depth below the root. The root itself is never checked.
//! - Results come back in the order the filesystem lists entries. Nothing is
//!   sorted.
//! - Symlinks are followed when `scan.follow_links` is set (the default). A
//!   symlink loop surfaces as a walk error rather than infinite descent.
//!
//! ## Failure
//!
//! A missing root, an unreadable directory, or a broken link aborts the whole
//! walk. There is no partial result.

use crate::config::ScanConfig;
use crate::naming::ExtensionFilter;
use crate::types::{Event, ImageRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read scan root {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scan root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Walk `root` and collect every image file below it.
///
/// Reports one [`Event::DirectoryIgnored`] per skipped directory and one
/// [`Event::ImageFound`] per match, in walk order.
pub fn scan(
    root: &Path,
    config: &ScanConfig,
    on_event: &mut dyn FnMut(Event),
) -> Result<Vec<ImageRecord>, ScanError> {
    let meta = fs::metadata(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let filter = ExtensionFilter::new(&config.extensions);
    let mut records = Vec::new();

    let mut walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            if entry.depth() > 0 && is_ignored_dir(&name, &config.ignore_dirs) {
                on_event(Event::DirectoryIgnored {
                    path: entry.path().to_path_buf(),
                });
                walker.skip_current_dir();
            }
            continue;
        }

        if !filter.matches(&name) {
            continue;
        }

        let path = entry.path();
        on_event(Event::ImageFound {
            path: path.to_path_buf(),
        });

        let relative = path.strip_prefix(root).unwrap_or(path);
        records.push(ImageRecord {
            filename: name.into_owned(),
            relative_path: relative.to_string_lossy().into_owned(),
            full_path: display_path(path),
            source: path.to_path_buf(),
        });
    }

    Ok(records)
}

/// Drop a leading `./` so a walk from `.` reports `a/pic.png`.
fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Exact, case-sensitive match against the ignore list.
fn is_ignored_dir(name: &str, ignore_dirs: &[String]) -> bool {
    ignore_dirs.iter().any(|ignored| ignored == name)
}
