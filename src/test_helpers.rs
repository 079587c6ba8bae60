//! Shared test utilities for the find-images test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = build_tree(&["a/pic.png", "node_modules/skip.jpg"]);
//! let records = scan(tmp.path(), &ScanConfig::default(), &mut |_| {}).unwrap();
//! let pic = find_record(&records, "a/pic.png");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::ImageRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/tree/` to a temp directory and return it.
///
/// The fixture holds `a/pic.png`, `a/b/pic.png`, `node_modules/skip.jpg`,
/// and `README.md`.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/tree");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create a temp tree with one small file per `/`-separated path.
///
/// Each file's content is its own relative path, so copies can be traced
/// back to their source.
pub fn build_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, rel.as_bytes()).unwrap();
    }
    tmp
}

// =========================================================================
// Record lookups: panics with a clear message on miss
// =========================================================================

/// Find a record by relative path, compared as paths so separators don't matter.
pub fn find_record<'a>(records: &'a [ImageRecord], relative: &str) -> &'a ImageRecord {
    records
        .iter()
        .find(|r| Path::new(&r.relative_path) == Path::new(relative))
        .unwrap_or_else(|| {
            let paths: Vec<&str> = records.iter().map(|r| r.relative_path.as_str()).collect();
            panic!("record '{relative}' not found. Available: {paths:?}")
        })
}
