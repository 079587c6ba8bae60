//! # find-images
//!
//! Finds every image file under a directory tree, writes a CSV manifest of
//! what it found, copies each image into one flat local directory, and writes
//! an HTML gallery that previews the copies.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Scan         root/     →  Vec<ImageRecord>          (walk + extension filter)
//! 2. Table        records   →  image_files.csv           (filename, relative_path, full_path)
//! 3. Materialize  records   →  images/<flattened name>   (+ local_path per record)
//! 4. Gallery      records   →  image_gallery.html        (one <img> per record)
//! ```
//!
//! Stages run one after another on a single thread. The first error stops the
//! run; whatever earlier stages wrote stays on disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: iterative directory walk, ignored directories, image discovery |
//! | [`table`] | Stage 2: CSV manifest of the walker's records |
//! | [`materialize`] | Stage 3: flat copies and their gallery-relative links |
//! | [`gallery`] | Stage 4: self-contained HTML document rendered with Maud |
//! | [`pipeline`] | Runs the stages in order from explicit [`pipeline::RunOptions`] |
//! | [`config`] | Optional TOML config: extensions, ignored directories, output paths |
//! | [`naming`] | Extension matching and path flattening |
//! | [`types`] | Records and progress events shared between stages |
//! | [`output`] | CLI output formatting for progress events |
//!
//! # Design Decisions
//!
//! ## Extension-Only Detection
//!
//! A file is an image because of its name, never its bytes. The recognized set
//! is `.png .jpg .jpeg .svg .webp`, compared case-insensitively. `.ico` and
//! `.gif` are opt-in through the config file.
//!
//! ## Flattened Names
//!
//! Copies are named after their relative path with separators replaced by
//! `_`, so `a/b/pic.png` becomes `a_b_pic.png`. The mapping is deterministic,
//! which makes re-runs idempotent. It is not injective: `a/b.png` and
//! `a_b.png` share a name and the later copy wins. That overwrite is accepted
//! behavior, not an error.
//!
//! ## Escaped Gallery Output
//!
//! The gallery is generated with [Maud](https://maud.lambda.xyz/), so every
//! filename and path is HTML-escaped on the way in. A file named
//! `<script>.png` shows up as text. Image links are percent-encoded as well,
//! so `a#1.png` points at the copy rather than a fragment.
//!
//! ## No Hidden Defaults in the Core
//!
//! The scan root, output paths, and filters all arrive through
//! [`pipeline::RunOptions`]. Defaults live in [`config`] and are applied by the
//! binary, so tests can run the whole pipeline inside a temp directory.
//!
//! ## Symlinks
//!
//! Symlinks to directories are followed by default with no special handling
//! beyond what `walkdir` does: a loop back to an ancestor is reported as a
//! walk error and aborts the run.

pub mod config;
pub mod gallery;
pub mod materialize;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod table;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
