//! The end-to-end run: walk → table → copies → gallery.
//!
//! Strictly sequential. Each stage finishes before the next starts, and the
//! first error stops the run. Outputs already written by earlier stages are
//! left in place.

use crate::config::{Config, ScanConfig};
use crate::gallery;
use crate::materialize::{self, MaterializeError};
use crate::scan::{self, ScanError};
use crate::table::{self, ExportError};
use crate::types::Event;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    #[error("cannot write output: {0}")]
    Export(#[from] ExportError),
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub root: PathBuf,
    pub scan: ScanConfig,
    pub table: PathBuf,
    pub gallery: PathBuf,
    pub images_dir: PathBuf,
    pub title: String,
}

impl RunOptions {
    /// Combine a scan root with the loaded config.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            scan: config.scan,
            table: config.output.table,
            gallery: config.output.gallery,
            images_dir: config.output.images_dir,
            title: config.output.title,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub images: usize,
    pub table: PathBuf,
    pub gallery: PathBuf,
    pub images_dir: PathBuf,
}

pub fn run(
    options: &RunOptions,
    on_event: &mut dyn FnMut(Event),
) -> Result<RunSummary, PipelineError> {
    on_event(Event::ScanStarted {
        root: options.root.clone(),
    });
    let records = scan::scan(&options.root, &options.scan, on_event)?;
    on_event(Event::ScanFinished {
        count: records.len(),
    });

    table::export_table(&records, &options.table)?;
    on_event(Event::TableWritten {
        path: options.table.clone(),
        rows: records.len(),
    });

    on_event(Event::CopyStarted {
        dir: options.images_dir.clone(),
    });
    let prefix = link_prefix(&options.gallery, &options.images_dir);
    let materialized = materialize::materialize(&records, &options.images_dir, &prefix, on_event)?;

    gallery::export_gallery(&materialized, &options.title, &options.gallery)?;
    on_event(Event::GalleryWritten {
        path: options.gallery.clone(),
        rows: materialized.len(),
    });

    Ok(RunSummary {
        images: records.len(),
        table: options.table.clone(),
        gallery: options.gallery.clone(),
        images_dir: options.images_dir.clone(),
    })
}

/// The images directory as a `/`-separated link from the gallery's directory.
///
/// ```text
/// gallery.html          + images             → images
/// site/index.html       + site/assets        → assets
/// site/index.html       + images             → ../images
/// /srv/site/index.html  + /srv/images        → ../images
/// ```
///
/// Both paths are compared lexically. When one is absolute and the other is
/// not, or the gallery sits under a leading `..`, both are resolved against
/// the working directory first. If no relative link exists (different drives)
/// the images directory is returned as given.
pub fn link_prefix(gallery: &Path, images_dir: &Path) -> String {
    let mut base = normalize(gallery.parent().unwrap_or(Path::new("")));
    let mut target = normalize(images_dir);

    if base.is_absolute() != target.is_absolute() || base.starts_with("..") {
        match (absolute(&base), absolute(&target)) {
            (Ok(b), Ok(t)) => {
                base = normalize(&b);
                target = normalize(&t);
            }
            _ => return slash_path(images_dir),
        }
    }

    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && target.is_absolute() {
        return slash_path(images_dir);
    }

    let mut parts: Vec<String> = vec!["..".to_string(); base_parts.len() - common];
    parts.extend(
        target_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

/// Drop `.` and fold `name/..` pairs without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        std::env::current_dir()
    } else {
        std::path::absolute(path)
    }
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
