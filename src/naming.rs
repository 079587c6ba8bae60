//! Filename conventions shared by the walker and the materializer.
//!
//! Two rules live here:
//!
//! - **Image classification**: a file is an image when its lowercase extension
//!   is in the configured set. Only the name is inspected, never the bytes.
//! - **Flattening**: a path relative to the scan root becomes a single flat
//!   filename by replacing every `/` and `\` with `_`.
//!
//! ```text
//! a/b/pic.png   → a_b_pic.png
//! a\b\pic.png   → a_b_pic.png
//! A.PNG         → image
//! a.PNGX        → not an image
//! ```

use std::path::Path;

/// Extensions recognized when no config overrides them.
///
/// `.ico` and `.gif` are deliberately absent; enable them through
/// `scan.extensions` in the config file.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".svg", ".webp"];

/// Case-insensitive extension matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionFilter {
    /// Lowercase extensions without the leading dot.
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter from extensions written as `.png` or `png`.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    /// Whether `filename` carries one of the recognized extensions.
    ///
    /// Dotfiles such as `.png` have no extension and never match.
    pub fn matches(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|known| *known == ext))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Flatten a root-relative path into a single filename.
///
/// Pure function of its input, so two runs over the same tree produce the same
/// names. Distinct paths can collide (`a/b.png` and `a_b.png`); that is not
/// detected here.
pub fn flatten_relative_path(relative_path: &str) -> String {
    relative_path.replace(['/', '\\'], "_")
}
