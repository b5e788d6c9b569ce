//! File emission for ranked neighbors and the condensed catalog summary.
//!
//! `related.txt` is the downstream consumption format: one line per course,
//! the subject id followed by alternating neighbor id / score pairs,
//! comma-separated, scores with exactly three decimal places. Every course
//! gets a line; a course with no neighbors is a bare id.
//!
//! `condensed.txt` is the summary emission: a header line and one quoted
//! record per course (quotes doubled, embedded newlines written as the
//! literal characters `\n`).

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{Catalog, RankedNeighbors};

/// Write `related.txt` into `directory`, creating the directory if needed.
/// Returns the written path.
pub fn write_related(directory: &Path, ranked: &[RankedNeighbors]) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory {}", directory.display()))?;

    let mut out = String::new();
    for course in ranked {
        out.push_str(&course.subject_id);
        for entry in &course.neighbors {
            // Infallible on String, but write! keeps the formatting in one place
            let _ = write!(out, ",{},{:.3}", entry.subject_id, entry.score);
        }
        out.push('\n');
    }

    let path = directory.join("related.txt");
    fs::write(&path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Write `condensed.txt` into `directory`, creating the directory if needed.
/// Returns the written path.
pub fn write_condensed(directory: &Path, catalog: &Catalog) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory {}", directory.display()))?;

    let mut out = String::from("Subject Id,Subject Title,Subject Description\n");
    for courses in catalog.values() {
        for record in courses.values() {
            let _ = writeln!(
                out,
                "{},{},{}",
                quote_field(&record.subject_id),
                quote_field(&record.title),
                quote_field(&record.description)
            );
        }
    }

    let path = directory.join("condensed.txt");
    fs::write(&path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Quote one field: wrap in double quotes, double embedded quotes, and write
/// embedded newlines as the literal characters `\n`.
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\"").replace('\n', "\\n"))
}
