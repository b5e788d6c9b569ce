//! Catalog file discovery.
//!
//! Walks the catalog directory with the `ignore` crate (gitignore-aware,
//! parallel) and keeps the department `.txt` files, skipping artifacts a
//! previous run may have written next to them. Results are sorted so every
//! run parses departments in the same order.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

/// File stems written by relmap itself; never re-ingested as departments.
const GENERATED_STEMS: &[&str] = &["related", "condensed"];

/// Find department catalog files under a directory.
///
/// A single-file path passes through untouched, so a department file can be
/// ingested on its own. Directory walks keep only `.txt` files that are not
/// generated artifacts.
pub fn find_catalog_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if directory.is_file() {
        return Ok(vec![directory.to_path_buf()]);
    }

    if !directory.is_dir() {
        anyhow::bail!("Path does not exist: {}", directory.display());
    }

    let walker = WalkBuilder::new(directory)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .follow_links(false)
        .threads(0)
        .build_parallel();

    let files = std::sync::Mutex::new(Vec::new());

    walker.run(|| {
        Box::new(|entry_result| {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if !path.is_file() || !is_catalog_file(path) {
                        return ignore::WalkState::Continue;
                    }

                    if let Ok(mut files) = files.lock() {
                        files.push(path.to_path_buf());
                    }

                    ignore::WalkState::Continue
                }
                // Skip entries we can't read (permissions, broken symlinks)
                Err(_) => ignore::WalkState::Continue,
            }
        })
    });

    let mut files = files
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Failed to unwrap mutex"))?;

    // Sort for reproducibility: the catalog's department order, and with it
    // the output files, follow discovery order.
    files.sort();

    Ok(files)
}

/// A catalog file is a `.txt` whose stem is not one of our own outputs.
fn is_catalog_file(path: &Path) -> bool {
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if !is_txt {
        return false;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| !GENERATED_STEMS.contains(&stem))
        .unwrap_or(false)
}
