//! Cross-listing extraction.
//!
//! Catalog records store their equivalent/joint/meets-with subjects as free
//! text: "6.3700, 6.3800", "18.03 or 18.032", "8.371[J]". Ranking needs to
//! ask "does course A list course B?" many times per scan, so each record's
//! three fields are parsed once, up front, into a set of course ids, and the
//! checks become exact set membership rather than substring probes (a
//! substring probe would let "6.00" collide with "6.002").

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::parser::strip_joint_suffix;
use crate::types::Catalog;

/// A course id embedded in free text: a dotted pair of alphanumeric runs.
static COURSE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+\.[A-Za-z0-9]+").expect("Invalid course id regex"));

/// Extract every course id embedded in a free-text cross-reference field.
pub fn course_ids_in(field: &str) -> HashSet<String> {
    COURSE_ID
        .find_iter(field)
        .map(|m| strip_joint_suffix(m.as_str()).to_string())
        .collect()
}

/// Parsed cross-listings for every course in the catalog.
///
/// The union of the ids found in a course's equivalent, joint, and meets-with
/// fields, keyed by subject id.
pub struct CrossListIndex {
    listings: HashMap<String, HashSet<String>>,
}

impl CrossListIndex {
    /// Parse the cross-reference fields of every record in the catalog.
    pub fn build(catalog: &Catalog) -> Self {
        let mut listings = HashMap::new();

        for courses in catalog.values() {
            for (subject_id, record) in courses {
                let mut ids = course_ids_in(&record.equivalent_subjects);
                ids.extend(course_ids_in(&record.joint_subjects));
                ids.extend(course_ids_in(&record.meets_with_subjects));
                listings.insert(subject_id.clone(), ids);
            }
        }

        Self { listings }
    }

    /// Whether `course` lists `candidate` among its cross-references.
    ///
    /// A course the index does not know has no listings: lookups that fail
    /// mean "no conflict", never an error.
    pub fn lists(&self, course: &str, candidate: &str) -> bool {
        self.listings
            .get(course)
            .map_or(false, |ids| ids.contains(candidate))
    }
}
