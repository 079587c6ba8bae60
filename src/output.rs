//! CLI output formatting.
//!
//! Stage boundaries are `==>` lines; per-entry progress is indented beneath
//! the stage that produced it.
//!
//! ```text
//! ==> Searching for image files in ./assets...
//!     Ignoring directory: ./assets/node_modules
//!     Found image file: ./assets/a/pic.png
//! ==> Found 1 image files
//! ==> Results exported to image_files.csv
//! ==> Copying images to images...
//!     Copied a/pic.png → images/a_pic.png
//! ==> Gallery exported to image_gallery.html
//! ```
//!
//! `format_*` functions are pure and return the text; `print_*` wrappers
//! write it to stdout.

use crate::pipeline::RunSummary;
use crate::types::Event;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn stage(text: String) -> String {
    format!("==> {text}")
}

fn detail(text: String) -> String {
    format!("{}{}", indent(1), text)
}

/// Format a single progress event as one display line.
pub fn format_event(event: &Event) -> String {
    match event {
        Event::ScanStarted { root } => {
            stage(format!("Searching for image files in {}...", root.display()))
        }
        Event::DirectoryIgnored { path } => {
            detail(format!("Ignoring directory: {}", path.display()))
        }
        Event::ImageFound { path } => detail(format!("Found image file: {}", path.display())),
        Event::ScanFinished { count } => stage(format!("Found {count} image files")),
        Event::TableWritten { path, .. } => {
            stage(format!("Results exported to {}", path.display()))
        }
        Event::CopyStarted { dir } => stage(format!("Copying images to {}...", dir.display())),
        Event::ImageCopied {
            relative_path,
            dest,
        } => detail(format!("Copied {} → {}", relative_path, dest.display())),
        Event::CopySkipped { dest } => {
            detail(format!("Already in place: {}", dest.display()))
        }
        Event::GalleryWritten { path, .. } => {
            stage(format!("Gallery exported to {}", path.display()))
        }
    }
}

/// Print one progress event to stdout.
pub fn print_event(event: &Event) {
    println!("{}", format_event(event));
}

/// Format the closing summary of a successful run.
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    vec![
        stage(format!("Done: {} images", summary.images)),
        detail(format!("Table: {}", summary.table.display())),
        detail(format!("Gallery: {}", summary.gallery.display())),
        detail(format!("Copies: {}/", summary.images_dir.display())),
    ]
}

/// Print the closing summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
