//! HTML gallery export.
//!
//! Stage 4 of the pipeline. Renders one self-contained document: a heading
//! and a table with a row per materialized image.
//!
//! | Filename | Preview | Relative Path |
//! |----------|---------|---------------|
//! | `pic.png` | `<img src="images/a_pic.png">` | `a/pic.png` |
//!
//! Styling is inline; the document loads nothing but the image copies. Long
//! paths are clipped with CSS, the text itself is never truncated.
//!
//! Uses [maud](https://maud.lambda.xyz/), so every interpolated filename and
//! path is HTML-escaped. A file called `<b>&.png` renders as text, not markup.

use crate::table::ExportError;
use crate::types::MaterializedImageRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::path::Path;

/// Characters that would end or corrupt a relative URL path.
const LINK: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

const CSS: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: 8px; text-align: left; border: 1px solid #ddd; vertical-align: middle; }
th { background-color: #f2f2f2; position: sticky; top: 0; }
img { max-width: 120px; max-height: 120px; object-fit: contain; }
tr:nth-child(even) { background-color: #f9f9f9; }
tr:hover { background-color: #f1f1f1; }
.path-cell { max-width: 400px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
h1 { margin-bottom: 20px; }
";

/// Render the gallery document.
pub fn render_gallery(records: &[MaterializedImageRecord], title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                h1 { (title) }
                table {
                    thead {
                        tr {
                            th { "Filename" }
                            th { "Preview" }
                            th { "Relative Path" }
                        }
                    }
                    tbody {
                        @for image in records {
                            (gallery_row(image))
                        }
                    }
                }
            }
        }
    }
}

fn gallery_row(image: &MaterializedImageRecord) -> Markup {
    let record = &image.record;
    html! {
        tr {
            td { (record.filename) }
            td {
                img src=(link_href(&image.local_path)) alt=(record.filename) loading="lazy";
            }
            td.path-cell title=(record.relative_path) { (record.relative_path) }
        }
    }
}

/// Percent-encode a `/`-separated local path for use as an `src` URL.
///
/// `a#1.png` must not become a fragment, `100%.png` must not become an
/// escape. Separators are kept; non-ASCII is encoded as UTF-8.
pub fn link_href(local_path: &str) -> String {
    utf8_percent_encode(local_path, LINK).to_string()
}

/// Write the gallery document to `path`, replacing any existing file.
pub fn export_gallery(
    records: &[MaterializedImageRecord],
    title: &str,
    path: &Path,
) -> Result<(), ExportError> {
    fs::write(path, render_gallery(records, title).into_string())?;
    Ok(())
}
