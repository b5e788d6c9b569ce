//! relmap-colors: course color palette sanity checker.
//!
//! Standalone check for the department color palette that downstream course
//! displays consume. Loads a JSON palette (department -> `#RRGGBB`), verifies
//! every value parses, that no two departments share a color, and that white
//! overlay text clears a contrast threshold. Optionally cross-checks a
//! catalog directory for departments with no palette entry.
//!
//! ## Usage
//!
//! ```bash
//! # Check a palette file
//! relmap-colors colors.json
//!
//! # Stricter contrast requirement
//! relmap-colors colors.json --min-contrast 4.5
//!
//! # Also flag catalog departments missing a palette entry
//! relmap-colors colors.json --catalog catalog/
//! ```
//!
//! Exits nonzero when any check fails, so it can gate a catalog publish.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use relmap::catalog::{find_catalog_files, parse_catalog};
use relmap::output::{check_palette, load_palette, swatch, Rgb};

#[derive(Parser, Debug)]
#[command(name = "relmap-colors")]
#[command(version)]
#[command(about = "Sanity-check a course color palette", long_about = None)]
struct Args {
    /// Palette JSON file: an object mapping department to "#RRGGBB"
    #[arg(value_name = "PALETTE")]
    palette: PathBuf,

    /// Minimum contrast ratio for white text over each color
    #[arg(long, default_value = "3.0")]
    min_contrast: f64,

    /// Catalog directory; departments found there but missing from the
    /// palette are reported
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Skip the colored swatch listing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run all checks. Returns whether the palette is clean.
fn run(args: &Args) -> Result<bool> {
    let palette = load_palette(&args.palette)?;

    if !args.quiet {
        for (department, value) in &palette {
            match Rgb::parse_hex(value) {
                Some(color) => println!("{}", swatch(color, department)),
                None => println!("?????? {department} ({value})"),
            }
        }
        println!();
    }

    let mut clean = true;

    let issues = check_palette(&palette, args.min_contrast);
    for issue in &issues {
        eprintln!("✗ {issue}");
        clean = false;
    }

    // Coverage check against a catalog, when asked
    if let Some(catalog_dir) = &args.catalog {
        let files = find_catalog_files(catalog_dir)?;
        let catalog = parse_catalog(&files)?;
        for department in catalog.keys() {
            if !palette.contains_key(department) {
                eprintln!("✗ {department}: no palette entry");
                clean = false;
            }
        }
    }

    if clean {
        println!("✓ {} palette entries, no issues", palette.len());
    }

    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["relmap-colors", "colors.json"]);
        assert_eq!(args.palette, PathBuf::from("colors.json"));
        assert_eq!(args.min_contrast, 3.0);
        assert!(args.catalog.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_parse_flags() {
        let args = Args::parse_from([
            "relmap-colors",
            "colors.json",
            "--min-contrast",
            "4.5",
            "--catalog",
            "catalog",
            "--quiet",
        ]);
        assert_eq!(args.min_contrast, 4.5);
        assert_eq!(args.catalog, Some(PathBuf::from("catalog")));
        assert!(args.quiet);
    }
}
