//! The relatedness scan.
//!
//! For every course, score every other course as
//! `document_similarity(profiles) * department_similarity(departments)` and
//! keep the top k in a `Slate`, rejecting candidates that alias an
//! already-ranked cross-listing from another department.
//!
//! The scan is O(N^2) over the catalog and dominates the run. Each course's
//! scan only reads shared immutable structures (profiles, matrix, catalog,
//! cross-list index), so the courses are ranked with a rayon parallel map -
//! no locks, just an atomic counter for progress reporting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::catalog::CrossListIndex;
use crate::extraction::TermFrequencyProfile;
use crate::ranking::Slate;
use crate::similarity::{document_similarity, DepartmentMatrix};
use crate::types::{department_of, Catalog, RankEntry, RankedNeighbors, RankingConfig};

pub struct RelatednessRanker {
    config: RankingConfig,
}

impl RelatednessRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Rank neighbors for every course in the catalog.
    ///
    /// Results come back in the catalog's own (department, id) order
    /// regardless of how the parallel scans interleave.
    pub fn rank_all(
        &self,
        catalog: &Catalog,
        profiles: &HashMap<String, TermFrequencyProfile>,
        departments: &DepartmentMatrix,
        crosslists: &CrossListIndex,
        progress: bool,
    ) -> Vec<RankedNeighbors> {
        let subject_ids: Vec<&String> = catalog.values().flat_map(|courses| courses.keys()).collect();
        let total = subject_ids.len();
        let completed = AtomicUsize::new(0);

        subject_ids
            .par_iter()
            .map(|subject_id| {
                let neighbors = self.rank_course(
                    subject_id.as_str(),
                    &subject_ids,
                    profiles,
                    departments,
                    crosslists,
                );

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if progress && done % self.config.progress_interval == 0 {
                    eprintln!("  ... ranked {done}/{total} courses");
                }

                RankedNeighbors {
                    subject_id: (*subject_id).clone(),
                    neighbors,
                }
            })
            .collect()
    }

    /// Scan all other courses for one target course.
    fn rank_course(
        &self,
        subject_id: &str,
        subject_ids: &[&String],
        profiles: &HashMap<String, TermFrequencyProfile>,
        departments: &DepartmentMatrix,
        crosslists: &CrossListIndex,
    ) -> Vec<RankEntry> {
        let department = department_of(subject_id);
        let profile = profiles.get(subject_id);
        let mut slate = Slate::new(self.config.neighbor_count);

        for other_id in subject_ids {
            let other_id = other_id.as_str();

            // Never rank a course against itself or its own cross-listings
            if other_id == subject_id || crosslists.lists(subject_id, other_id) {
                continue;
            }

            let text_similarity = match (profile, profiles.get(other_id)) {
                (Some(own), Some(other)) => document_similarity(own, other),
                _ => 0.0,
            };
            let distance =
                text_similarity * departments.get(department, department_of(other_id));

            // A candidate that aliases the occupant it would displace is a
            // redundant cross-listing of a course we already ranked; skip it
            // entirely so the slate holds distinct courses. Same-department
            // occupants never conflict.
            slate.admit(other_id, distance, |occupant| {
                department_of(occupant) != department
                    && (occupant == other_id || crosslists.lists(occupant, other_id))
            });
        }

        slate.into_ranked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CrossListIndex;
    use crate::extraction::course_profiles;
    use crate::similarity::department_profiles;
    use crate::types::CourseRecord;

    fn course(subject_id: &str, description: &str) -> CourseRecord {
        CourseRecord {
            subject_id: subject_id.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn build_catalog(records: Vec<CourseRecord>) -> Catalog {
        let mut catalog = Catalog::new();
        for record in records {
            catalog
                .entry(record.department().to_string())
                .or_default()
                .insert(record.subject_id.clone(), record);
        }
        catalog
    }

    fn rank(catalog: &Catalog, config: RankingConfig) -> HashMap<String, Vec<RankEntry>> {
        let profiles = course_profiles(catalog, &config);
        let dept_profiles = department_profiles(catalog, &profiles);
        let matrix = DepartmentMatrix::build(&dept_profiles, config.similarity_floor);
        let crosslists = CrossListIndex::build(catalog);

        let ranker = RelatednessRanker::new(config);
        ranker
            .rank_all(catalog, &profiles, &matrix, &crosslists, false)
            .into_iter()
            .map(|r| (r.subject_id, r.neighbors))
            .collect()
    }

    #[test]
    fn test_no_self_and_descending_scores() {
        let catalog = build_catalog(vec![
            course("6.006", "algorithms data structures graphs sorting"),
            course("6.046", "advanced algorithms graphs randomized analysis"),
            course("6.031", "software construction testing specifications"),
        ]);

        let ranked = rank(&catalog, RankingConfig::default());

        for (subject_id, neighbors) in &ranked {
            assert!(neighbors.iter().all(|e| e.subject_id != *subject_id));
            assert!(neighbors.iter().all(|e| e.score > 0.0));
            assert!(neighbors.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(neighbors.len() <= 10);
        }

        // The two algorithms courses find each other first
        assert_eq!(ranked["6.006"][0].subject_id, "6.046");
        assert_eq!(ranked["6.046"][0].subject_id, "6.006");
    }

    #[test]
    fn test_empty_description_gets_empty_output() {
        let catalog = build_catalog(vec![
            course("6.S042", ""),
            course("6.006", "algorithms data structures"),
            course("6.046", "algorithms randomized analysis"),
        ]);

        let ranked = rank(&catalog, RankingConfig::default());

        assert!(ranked["6.S042"].is_empty());
        // And nobody ranks the empty course
        for (subject_id, neighbors) in &ranked {
            if subject_id != "6.S042" {
                assert!(neighbors.iter().all(|e| e.subject_id != "6.S042"));
            }
        }
    }

    #[test]
    fn test_cross_listed_courses_exclude_each_other() {
        let mut equivalent_a = course("6.3700", "probability random variables distributions");
        equivalent_a.equivalent_subjects = "18.600".to_string();
        let mut equivalent_b = course("18.600", "probability random variables distributions");
        equivalent_b.equivalent_subjects = "6.3700".to_string();

        let catalog = build_catalog(vec![
            equivalent_a,
            equivalent_b,
            course("9.660", "probability inference distributions models"),
        ]);

        let ranked = rank(&catalog, RankingConfig::default());

        assert!(ranked["6.3700"].iter().all(|e| e.subject_id != "18.600"));
        assert!(ranked["18.600"].iter().all(|e| e.subject_id != "6.3700"));
        // The third-department course still ranks for both
        assert!(ranked["6.3700"].iter().any(|e| e.subject_id == "9.660"));
        assert!(ranked["18.600"].iter().any(|e| e.subject_id == "9.660"));
    }

    #[test]
    fn test_alias_of_ranked_foreign_course_is_rejected() {
        // 18.600 and 6.3700 are the same underlying course; from 9.660's
        // perspective only one of them should make the slate.
        let mut alias_a = course("18.600", "probability random variables distributions inference");
        alias_a.equivalent_subjects = "6.3700".to_string();
        let mut alias_b = course("6.3700", "probability random variables distributions inference");
        alias_b.equivalent_subjects = "18.600".to_string();

        let catalog = build_catalog(vec![
            alias_a,
            alias_b,
            course("9.660", "probability distributions inference models"),
        ]);

        let ranked = rank(&catalog, RankingConfig::default());

        let from_alias_pair: Vec<_> = ranked["9.660"]
            .iter()
            .filter(|e| e.subject_id == "18.600" || e.subject_id == "6.3700")
            .collect();
        assert_eq!(from_alias_pair.len(), 1);
    }

    #[test]
    fn test_neighbor_count_is_respected() {
        let mut records = Vec::new();
        for i in 0..8 {
            records.push(course(
                &format!("6.{i:03}"),
                "computation algorithms systems theory",
            ));
        }

        let config = RankingConfig {
            neighbor_count: 3,
            ..Default::default()
        };
        let ranked = rank(&build_catalog(records), config);

        for neighbors in ranked.values() {
            assert_eq!(neighbors.len(), 3);
        }
    }

    #[test]
    fn test_same_department_outranks_distant_department_on_equal_text() {
        // Identical descriptions; the department weight should order the
        // same-department candidate (weight 1) above the unrelated one
        let catalog = build_catalog(vec![
            course("6.006", "algorithms data structures graphs"),
            course("6.046", "algorithms data structures graphs"),
            course("21M.030", "algorithms data structures graphs"),
            // Anchor departments apart: 21M's other course shares nothing with 6
            course("21M.011", "harmony counterpoint orchestration listening"),
            course("6.031", "software construction testing specifications design"),
        ]);

        let ranked = rank(&catalog, RankingConfig::default());
        let neighbors = &ranked["6.006"];

        let pos_6 = neighbors.iter().position(|e| e.subject_id == "6.046");
        let pos_21m = neighbors.iter().position(|e| e.subject_id == "21M.030");
        assert!(pos_6.is_some());
        assert!(pos_21m.is_none() || pos_6 < pos_21m);
    }
}
