//! Local copies of discovered images.
//!
//! Stage 3 of the pipeline. Every record is copied into one flat directory
//! under its flattened name (see [`crate::naming::flatten_relative_path`]),
//! and gains a `local_path` the gallery links to.
//!
//! ```text
//! a/pic.png     → images/a_pic.png
//! a/b/pic.png   → images/a_b_pic.png
//! ```
//!
//! Existing files are overwritten. Re-running over the same tree rewrites the
//! same set of names with the same bytes.
//!
//! Two distinct paths can flatten to the same name (`a/b.png`, `a_b.png`);
//! the later record's copy wins and both records point at it.
//!
//! The batch is not atomic: if a copy fails, the copies already written stay
//! on disk and the remaining records are not attempted.

use crate::naming::flatten_relative_path;
use crate::types::{Event, ImageRecord, MaterializedImageRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("cannot create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Copy every record into `dest_dir` and attach its `local_path`.
///
/// `link_prefix` is the directory part of `local_path` as seen from the
/// gallery document (normally `images`); an empty prefix links bare names.
pub fn materialize(
    records: &[ImageRecord],
    dest_dir: &Path,
    link_prefix: &str,
    on_event: &mut dyn FnMut(Event),
) -> Result<Vec<MaterializedImageRecord>, MaterializeError> {
    fs::create_dir_all(dest_dir).map_err(|source| MaterializeError::CreateDir {
        path: dest_dir.to_path_buf(),
        source,
    })?;

    let mut materialized = Vec::with_capacity(records.len());
    for record in records {
        let flat = flatten_relative_path(&record.relative_path);
        let from = record.source.as_path();
        let dest = dest_dir.join(&flat);

        if is_same_file(from, &dest) {
            on_event(Event::CopySkipped { dest: dest.clone() });
        } else {
            fs::copy(from, &dest).map_err(|source| MaterializeError::Copy {
                from: from.to_path_buf(),
                to: dest.clone(),
                source,
            })?;
            on_event(Event::ImageCopied {
                relative_path: record.relative_path.clone(),
                dest,
            });
        }

        materialized.push(MaterializedImageRecord {
            record: record.clone(),
            local_path: local_path(link_prefix, &flat),
        });
    }

    Ok(materialized)
}

/// Join the link prefix and a flattened name with `/`.
pub fn local_path(link_prefix: &str, flat_name: &str) -> String {
    let prefix = link_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        flat_name.to_string()
    } else {
        format!("{prefix}/{flat_name}")
    }
}

/// `fs::copy` onto itself truncates the source, so detect it first.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn record(root: &Path, relative: &str) -> ImageRecord {
        let full = root.join(relative);
        ImageRecord {
            filename: full.file_name().unwrap().to_string_lossy().into_owned(),
            relative_path: relative.to_string(),
            full_path: full.to_string_lossy().into_owned(),
            source: full,
        }
    }

    fn dir_names(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn copies_under_flattened_names() {
        let src = build_tree(&["a/pic.png", "a/b/pic.png"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("images");
        let records = vec![record(src.path(), "a/pic.png"), record(src.path(), "a/b/pic.png")];

        let materialized = materialize(&records, &dest, "images", &mut |_| {}).unwrap();

        assert_eq!(
            dir_names(&dest),
            BTreeSet::from(["a_pic.png".to_string(), "a_b_pic.png".to_string()])
        );
        assert_eq!(
            fs::read_to_string(dest.join("a_b_pic.png")).unwrap(),
            fs::read_to_string(src.path().join("a/b/pic.png")).unwrap()
        );
        let links: Vec<&str> = materialized.iter().map(|m| m.local_path.as_str()).collect();
        assert_eq!(links, vec!["images/a_pic.png", "images/a_b_pic.png"]);
    }

    #[test]
    fn creates_nested_destination() {
        let src = build_tree(&["pic.png"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("deep/nested/images");

        materialize(&[record(src.path(), "pic.png")], &dest, "images", &mut |_| {}).unwrap();
        assert!(dest.join("pic.png").is_file());
    }

    #[test]
    fn preserves_record_fields_and_order() {
        let src = build_tree(&["z.png", "a.png"]);
        let out = TempDir::new().unwrap();
        let records = vec![record(src.path(), "z.png"), record(src.path(), "a.png")];

        let materialized = materialize(&records, out.path(), "images", &mut |_| {}).unwrap();
        let inner: Vec<ImageRecord> = materialized.into_iter().map(|m| m.record).collect();
        assert_eq!(inner, records);
    }

    #[test]
    fn second_run_is_idempotent() {
        let src = build_tree(&["a/pic.png", "a/b/pic.png"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("images");
        let records = vec![record(src.path(), "a/pic.png"), record(src.path(), "a/b/pic.png")];

        let first = materialize(&records, &dest, "images", &mut |_| {}).unwrap();
        let names_first = dir_names(&dest);
        let bytes_first = fs::read(dest.join("a_pic.png")).unwrap();

        let second = materialize(&records, &dest, "images", &mut |_| {}).unwrap();
        assert_eq!(first, second);
        assert_eq!(dir_names(&dest), names_first);
        assert_eq!(fs::read(dest.join("a_pic.png")).unwrap(), bytes_first);
    }

    #[test]
    fn overwrites_existing_file() {
        let src = build_tree(&["pic.png"]);
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("pic.png"), "stale").unwrap();

        materialize(&[record(src.path(), "pic.png")], out.path(), "", &mut |_| {}).unwrap();
        assert_ne!(fs::read_to_string(out.path().join("pic.png")).unwrap(), "stale");
    }

    #[test]
    fn colliding_names_last_copy_wins() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("a")).unwrap();
        fs::write(src.path().join("a/b.png"), "nested").unwrap();
        fs::write(src.path().join("a_b.png"), "flat").unwrap();
        let out = TempDir::new().unwrap();
        let records = vec![record(src.path(), "a/b.png"), record(src.path(), "a_b.png")];

        let materialized = materialize(&records, out.path(), "images", &mut |_| {}).unwrap();

        assert_eq!(materialized.len(), 2);
        assert_eq!(materialized[0].local_path, "images/a_b.png");
        assert_eq!(materialized[1].local_path, "images/a_b.png");
        assert_eq!(dir_names(out.path()), BTreeSet::from(["a_b.png".to_string()]));
        assert_eq!(fs::read_to_string(out.path().join("a_b.png")).unwrap(), "flat");
    }

    #[test]
    fn copy_onto_itself_is_skipped() {
        let src = build_tree(&["pic.png"]);
        let before = fs::read(src.path().join("pic.png")).unwrap();
        let mut events = Vec::new();

        let materialized = materialize(
            &[record(src.path(), "pic.png")],
            src.path(),
            "images",
            &mut |e| events.push(e),
        )
        .unwrap();

        assert_eq!(materialized.len(), 1);
        assert_eq!(fs::read(src.path().join("pic.png")).unwrap(), before);
        assert!(matches!(events.as_slice(), [Event::CopySkipped { .. }]));
    }

    #[test]
    fn missing_source_aborts_batch() {
        let src = build_tree(&["a.png"]);
        let out = TempDir::new().unwrap();
        let records = vec![
            record(src.path(), "a.png"),
            record(src.path(), "gone.png"),
            record(src.path(), "a.png"),
        ];
        let mut copied = 0;

        let result = materialize(&records, out.path(), "images", &mut |e| {
            if matches!(e, Event::ImageCopied { .. }) {
                copied += 1;
            }
        });

        assert!(matches!(result, Err(MaterializeError::Copy { .. })));
        assert_eq!(copied, 1);
        assert!(out.path().join("a.png").is_file());
    }

    #[test]
    fn destination_blocked_by_file_is_error() {
        let out = TempDir::new().unwrap();
        let blocker = out.path().join("images");
        fs::write(&blocker, "not a dir").unwrap();

        let result = materialize(&[], &blocker, "images", &mut |_| {});
        assert!(matches!(result, Err(MaterializeError::CreateDir { .. })));
    }

    #[test]
    fn local_path_joins_with_slash() {
        assert_eq!(local_path("images", "a_pic.png"), "images/a_pic.png");
        assert_eq!(local_path("images/", "a_pic.png"), "images/a_pic.png");
        assert_eq!(local_path("", "a_pic.png"), "a_pic.png");
    }
}
