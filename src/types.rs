//! Core types for relmap - the course catalog relatedness mapper.
//!
//! The catalog is loaded once, frozen, and then only read by the profiling
//! and ranking stages. BTreeMaps keep department and course iteration in
//! sorted order so that every run scans candidates and emits output files in
//! the same order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single course as parsed from a department catalog file.
///
/// The three cross-reference fields are kept as the raw free-text strings
/// from the catalog; `catalog::CrossListIndex` parses them into id sets.
/// Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Subject identifier in `DEPT.NUMBER` form, e.g. "6.006".
    pub subject_id: String,
    /// Subject title, e.g. "Introduction to Algorithms".
    pub title: String,
    /// Free-text catalog description; may be empty.
    pub description: String,
    /// Raw "Equivalent Subjects" field.
    pub equivalent_subjects: String,
    /// Raw "Joint Subjects" field.
    pub joint_subjects: String,
    /// Raw "Meets With Subjects" field.
    pub meets_with_subjects: String,
}

impl CourseRecord {
    /// Department this course belongs to, derived from its id prefix.
    pub fn department(&self) -> &str {
        department_of(&self.subject_id)
    }
}

/// Department prefix of a subject id: everything before the first `.`.
///
/// Departments are not stored anywhere; they are always derived on demand
/// from an identifier. An id without a `.` is its own department.
pub fn department_of(subject_id: &str) -> &str {
    subject_id.split('.').next().unwrap_or(subject_id)
}

/// The whole catalog: department name -> subject id -> record.
///
/// Every course id appears under exactly one department (its own prefix).
pub type Catalog = BTreeMap<String, BTreeMap<String, CourseRecord>>;

/// Look up a course record by subject id.
///
/// Returns `None` when the id's department is not in the catalog or the
/// department does not carry the course. Callers in the ranking path treat
/// a failed lookup as benign, never as an error.
pub fn lookup<'a>(catalog: &'a Catalog, subject_id: &str) -> Option<&'a CourseRecord> {
    catalog.get(department_of(subject_id))?.get(subject_id)
}

/// Total number of courses across all departments.
pub fn course_count(catalog: &Catalog) -> usize {
    catalog.values().map(BTreeMap::len).sum()
}

/// One ranked neighbor: a subject id and its relatedness score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub subject_id: String,
    pub score: f64,
}

/// The ranked output for a single course: up to `neighbor_count` entries in
/// strictly descending score order, all with score > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNeighbors {
    pub subject_id: String,
    pub neighbors: Vec<RankEntry>,
}

/// Configuration for the relatedness engine.
/// All values are tunable at runtime via `relmap.toml` or CLI flags.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Number of related courses kept per course (the slate size).
    pub neighbor_count: usize,
    /// Tokens with at most this many characters are discarded.
    pub word_length_cutoff: usize,
    /// Lower bound for department similarity. Keeps the matrix usable as a
    /// multiplicative weight: a candidate is discounted, never zeroed out.
    pub similarity_floor: f64,
    /// Courses between progress reports during the ranking scan.
    pub progress_interval: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 10,
            word_length_cutoff: 3,
            similarity_floor: 0.00001,
            progress_interval: 500,
        }
    }
}
