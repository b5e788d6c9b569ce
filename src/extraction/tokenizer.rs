//! Word tokenization and term-frequency counting.
//!
//! The tokenizer is deliberately simple: lowercase the text, take maximal
//! runs of word characters, drop short tokens, count the rest. No stemming
//! and no stop-word list; the length cutoff alone filters out most function
//! words ("the", "and", "of"). Deterministic and pure - the same text always
//! yields the same profile.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Catalog, RankingConfig};

/// Word -> occurrence count within one text.
pub type TermFrequencyProfile = HashMap<String, u32>;

/// A word is a maximal run of letters, digits, apostrophes, or hyphens.
/// Everything else separates tokens.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}'-]+").expect("Invalid word regex"));

/// Extract a term-frequency profile from a description.
///
/// Tokens with at most `length_cutoff` characters are discarded. An empty or
/// missing description simply yields an empty profile; downstream that means
/// zero similarity to everything, not an error.
pub fn term_frequencies(text: &str, length_cutoff: usize) -> TermFrequencyProfile {
    let lowered = text.to_lowercase();
    let mut profile = TermFrequencyProfile::new();

    for token in WORD.find_iter(&lowered) {
        let word = token.as_str();
        if word.chars().count() <= length_cutoff {
            continue;
        }
        *profile.entry(word.to_string()).or_insert(0) += 1;
    }

    profile
}

/// Build one profile per course across the whole catalog.
///
/// Keyed by subject id. Built once before ranking begins and read-only
/// afterward.
pub fn course_profiles(
    catalog: &Catalog,
    config: &RankingConfig,
) -> HashMap<String, TermFrequencyProfile> {
    let mut profiles = HashMap::new();
    for courses in catalog.values() {
        for (subject_id, record) in courses {
            profiles.insert(
                subject_id.clone(),
                term_frequencies(&record.description, config.word_length_cutoff),
            );
        }
    }
    profiles
}
