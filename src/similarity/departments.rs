//! Department-level profiles and the pairwise department similarity matrix.
//!
//! A department's profile is the elementwise sum of its courses' profiles.
//! The matrix normalizes the raw cross-department score by both departments'
//! self-similarity, squares fall out of the ratio `cross^2 / (self_a *
//! self_b)`, so self-pairs saturate at 1 and unrelated pairs approach 0.
//! Every entry is floored at a small positive constant: the ranker multiplies
//! candidate scores by these values, and a literal zero would erase a
//! candidate entirely.
//!
//! The matrix must be built once, up front. Ranking looks up a department
//! pair for every course pair it scans; recomputing the aggregate similarity
//! there would multiply the quadratic scan by the department count.

use std::collections::{BTreeMap, HashMap};

use crate::extraction::TermFrequencyProfile;
use crate::similarity::document_similarity;
use crate::types::Catalog;

/// Merge each department's course profiles into one department profile.
///
/// A department whose courses have no extractable terms gets an empty
/// profile; the matrix handles that case explicitly.
pub fn department_profiles(
    catalog: &Catalog,
    course_profiles: &HashMap<String, TermFrequencyProfile>,
) -> BTreeMap<String, TermFrequencyProfile> {
    let mut merged = BTreeMap::new();

    for (department, courses) in catalog {
        let profile: &mut TermFrequencyProfile = merged.entry(department.clone()).or_default();
        for subject_id in courses.keys() {
            if let Some(course_profile) = course_profiles.get(subject_id) {
                for (word, count) in course_profile {
                    *profile.entry(word.clone()).or_insert(0) += count;
                }
            }
        }
    }

    merged
}

/// Symmetric department-pair similarity table.
///
/// Defined for every pair of departments present in the catalog, including
/// self-pairs. Always >= the floor. Lookups for pairs that were never built
/// (a department absent from the catalog) also return the floor - the
/// permissive default, so ranking never has to treat a missing department as
/// an error.
pub struct DepartmentMatrix {
    scores: HashMap<String, HashMap<String, f64>>,
    floor: f64,
}

impl DepartmentMatrix {
    /// Build the full matrix over all department profiles.
    ///
    /// If either profile of a pair is empty the pair gets the floor outright.
    /// This must stay an explicit branch: an empty profile has zero
    /// self-similarity, and the normalized ratio would divide by it.
    pub fn build(profiles: &BTreeMap<String, TermFrequencyProfile>, floor: f64) -> Self {
        let departments: Vec<&String> = profiles.keys().collect();

        // Self-similarities once; every normalized pair reuses them
        let self_sims: HashMap<&str, f64> = departments
            .iter()
            .map(|d| (d.as_str(), document_similarity(&profiles[*d], &profiles[*d])))
            .collect();

        let mut scores: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for (i, d1) in departments.iter().enumerate() {
            for d2 in &departments[i..] {
                let p1 = &profiles[*d1];
                let p2 = &profiles[*d2];

                let score = if p1.is_empty() || p2.is_empty() {
                    floor
                } else {
                    let cross = document_similarity(p1, p2);
                    let normalized = cross * cross / (self_sims[d1.as_str()] * self_sims[d2.as_str()]);
                    normalized.max(floor)
                };

                scores
                    .entry((*d1).clone())
                    .or_default()
                    .insert((*d2).clone(), score);
                if d1 != d2 {
                    scores
                        .entry((*d2).clone())
                        .or_default()
                        .insert((*d1).clone(), score);
                }
            }
        }

        Self { scores, floor }
    }

    /// Similarity weight for a department pair.
    pub fn get(&self, d1: &str, d2: &str) -> f64 {
        self.scores
            .get(d1)
            .and_then(|row| row.get(d2))
            .copied()
            .unwrap_or(self.floor)
    }

    /// Number of departments covered by the matrix.
    pub fn department_count(&self) -> usize {
        self.scores.len()
    }
}
