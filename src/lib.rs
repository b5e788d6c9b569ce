//! relmap - course catalog relatedness mapping
//!
//! Ingests a tabular course catalog (one delimited text file per department)
//! and derives, for every course, a ranked list of the most topically related
//! other courses: term-frequency similarity over course descriptions,
//! weighted by how similar each course's home department is to the
//! candidate's department.
//!
//! # Architecture
//!
//! ```text
//! Discovery → Record Parsing → Term Profiles → Department Matrix → Ranking → Emission
//!     ↓             ↓               ↓                ↓                ↓          ↓
//!  ignore       quoted-CSV      regex word       normalized        top-k    related.txt
//!  crate         dialect       frequencies      squared sim        slate    condensed.txt
//! ```
//!
//! Everything is built in one pass per run: profiles and the department
//! matrix are completed before ranking starts, ranking reads them as frozen
//! structures, and nothing persists between runs.
//!
//! # Performance strategies
//!
//! - Department similarity precomputed once; the quadratic scan only does
//!   table lookups per candidate
//! - Per-course scans are independent and run as a rayon parallel map
//! - Sorted catalogs and sorted file discovery keep every run deterministic

pub mod catalog;
pub mod config;
pub mod extraction;
pub mod output;
pub mod ranking;
pub mod similarity;
pub mod types;

// Re-export core types
pub use types::{
    course_count, department_of, lookup, Catalog, CourseRecord, RankEntry, RankedNeighbors,
    RankingConfig,
};

// Re-export the engine stages
pub use extraction::{course_profiles, term_frequencies, TermFrequencyProfile};
pub use ranking::RelatednessRanker;
pub use similarity::{department_profiles, document_similarity, DepartmentMatrix};
