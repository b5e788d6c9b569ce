//! relmap CLI - course catalog relatedness mapping
//!
//! Command-line entry point. Orchestrates the full pipeline:
//!
//! 1. Discovery: find department catalog files in the catalog directory
//! 2. Parsing: delimited records -> in-memory catalog
//! 3. Profiling: term-frequency profile per course, then per department
//! 4. Department matrix: normalized pairwise department similarity
//! 5. Ranking: top-k related courses per course, cross-listings deduplicated
//! 6. Emission: related.txt and the condensed summary
//!
//! Design philosophy:
//! - Fail fast with clear error messages at the I/O boundary
//! - Skip malformed records with a warning; the engine sees clean input only
//! - Deterministic output: same catalog in, byte-identical files out

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Course catalog relatedness mapping
///
/// relmap scans a directory of department catalog files, profiles every
/// course description, and writes each course's most related other courses
/// with scores.
///
/// Examples:
///   relmap catalog/                    # Rank with defaults, write next to input
///   relmap catalog/ --out build/       # Separate output directory
///   relmap catalog/ -k 25              # Keep more neighbors per course
///   relmap catalog/ --stats --verbose  # Watch the stages and totals
#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Catalog directory of department files (or a single department file)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Output directory for related.txt and condensed.txt
    ///
    /// Defaults to the directory from relmap.toml, or the catalog directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Number of related courses kept per course
    #[arg(short = 'k', long, value_name = "N")]
    pub neighbors: Option<usize>,

    /// Discard words with at most this many characters
    ///
    /// The tokenizer's only filter: there is no stop-word list, the length
    /// cutoff alone drops most function words.
    #[arg(long, value_name = "LEN")]
    pub word_length_cutoff: Option<usize>,

    /// Lower bound for department similarity weights
    ///
    /// Department similarity multiplies every candidate score; the floor
    /// keeps a dissimilar department from zeroing candidates out entirely.
    #[arg(long, value_name = "FLOOR")]
    pub similarity_floor: Option<f64>,

    /// Skip writing the condensed summary file
    #[arg(long)]
    pub no_condensed: bool,

    /// Show statistics at the end
    ///
    /// Prints totals after the run: files parsed, courses, departments,
    /// time breakdown.
    #[arg(long)]
    pub stats: bool,

    /// Verbose output
    ///
    /// Shows progress messages during execution:
    ///   "Parsing: catalog/6.txt"
    ///   "✓ Profiled 1234 courses"
    ///   "... ranked 500/1234 courses"
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = run(&cli)?;
    println!("{}", output);

    Ok(())
}

/// Execute the full relmap pipeline. Returns the summary line for stdout.
fn run(cli: &Cli) -> Result<String> {
    use relmap::catalog::{find_catalog_files, parse_catalog, CrossListIndex};
    use relmap::config::Config;
    use relmap::extraction::course_profiles;
    use relmap::output::{write_condensed, write_related};
    use relmap::ranking::RelatednessRanker;
    use relmap::similarity::{department_profiles, DepartmentMatrix};
    use relmap::types::course_count;
    use std::time::Instant;

    let start = Instant::now();

    // Load configuration and apply CLI overrides
    let config_dir = if cli.catalog.is_file() {
        cli.catalog.parent().map(PathBuf::from).unwrap_or_default()
    } else {
        cli.catalog.clone()
    };
    let file_config = Config::load(&config_dir);

    let mut ranking_config = file_config.ranking.clone();
    if let Some(k) = cli.neighbors {
        ranking_config.neighbor_count = k;
    }
    if let Some(cutoff) = cli.word_length_cutoff {
        ranking_config.word_length_cutoff = cutoff;
    }
    if let Some(floor) = cli.similarity_floor {
        ranking_config.similarity_floor = floor;
    }

    let out_dir = cli
        .out
        .clone()
        .or_else(|| file_config.output_directory.clone())
        .unwrap_or_else(|| config_dir.clone());

    if cli.verbose {
        eprintln!("🗺️  relmap v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("📂 Catalog: {}", cli.catalog.display());
        eprintln!("{}", file_config.display_summary());
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 1: Catalog File Discovery
    // ══════════════════════════════════════════════════════════════════════════
    let files = find_catalog_files(&cli.catalog)?;

    if files.is_empty() {
        return Ok("No catalog files found. Check the catalog path.".into());
    }

    if cli.verbose {
        eprintln!("✓ Found {} catalog files ({:.2?})", files.len(), start.elapsed());
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 2: Record Parsing
    // ══════════════════════════════════════════════════════════════════════════
    let parse_start = Instant::now();
    let catalog = parse_catalog(&files)?;
    let courses = course_count(&catalog);

    if courses == 0 {
        return Ok("No courses parsed. Check the catalog file format.".into());
    }

    if cli.verbose {
        eprintln!(
            "✓ Parsed {} courses in {} departments ({:.2?})",
            courses,
            catalog.len(),
            parse_start.elapsed()
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 3: Term-Frequency Profiles
    // ══════════════════════════════════════════════════════════════════════════
    let profile_start = Instant::now();
    let profiles = course_profiles(&catalog, &ranking_config);
    let dept_profiles = department_profiles(&catalog, &profiles);

    if cli.verbose {
        eprintln!(
            "✓ Profiled {} courses, {} departments ({:.2?})",
            profiles.len(),
            dept_profiles.len(),
            profile_start.elapsed()
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 4: Department Similarity Matrix
    // ══════════════════════════════════════════════════════════════════════════
    // Built once, up front: the ranking scan looks up a department pair for
    // every course pair it considers.
    let matrix_start = Instant::now();
    let matrix = DepartmentMatrix::build(&dept_profiles, ranking_config.similarity_floor);

    if cli.verbose {
        eprintln!(
            "✓ Built department matrix for {} departments ({:.2?})",
            matrix.department_count(),
            matrix_start.elapsed()
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 5: Relatedness Ranking
    // ══════════════════════════════════════════════════════════════════════════
    let rank_start = Instant::now();
    let crosslists = CrossListIndex::build(&catalog);

    let ranker = RelatednessRanker::new(ranking_config.clone());
    let ranked = ranker.rank_all(&catalog, &profiles, &matrix, &crosslists, cli.verbose);

    if cli.verbose {
        eprintln!(
            "✓ Ranked {} courses ({:.2?})",
            ranked.len(),
            rank_start.elapsed()
        );
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 6: Emission
    // ══════════════════════════════════════════════════════════════════════════
    let write_start = Instant::now();
    let related_path = write_related(&out_dir, &ranked)?;
    if !cli.no_condensed {
        write_condensed(&out_dir, &catalog)?;
    }

    if cli.verbose {
        eprintln!("✓ Wrote output files ({:.2?})", write_start.elapsed());
        eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        eprintln!("Total time: {:.2?}", start.elapsed());
    }

    let summary = format!(
        "Ranked {} courses across {} departments -> {}",
        courses,
        catalog.len(),
        related_path.display()
    );

    if cli.stats {
        let with_neighbors = ranked.iter().filter(|r| !r.neighbors.is_empty()).count();
        let stats = format!(
            "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
             ## Statistics\n\
             Catalog files: {}\n\
             Courses: {}\n\
             Departments: {}\n\
             Courses with neighbors: {}\n\
             Neighbors per course (max): {}\n\
             Total time: {:.2?}",
            files.len(),
            courses,
            catalog.len(),
            with_neighbors,
            ranking_config.neighbor_count,
            start.elapsed()
        );
        Ok(format!("{summary}{stats}"))
    } else {
        Ok(summary)
    }
}
