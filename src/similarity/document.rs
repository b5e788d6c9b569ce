//! Pairwise document similarity.
//!
//! The score is an unnormalized weighted dot product over shared words:
//! for each word present in both profiles, accumulate
//! `count_a * count_b * ln(word_length)`. The log-length weight biases the
//! score toward longer, more specific vocabulary; the tokenizer's length
//! cutoff has already removed the shortest words. This is not cosine
//! similarity - absolute magnitude grows with document length and
//! vocabulary richness.

use crate::extraction::TermFrequencyProfile;

/// Score two term-frequency profiles against each other.
///
/// Always >= 0, exactly 0 when the profiles share no words, and symmetric in
/// its arguments. Note that `document_similarity(p, p)` is not an upper
/// bound for `document_similarity(p, q)` - the score is unnormalized.
pub fn document_similarity(a: &TermFrequencyProfile, b: &TermFrequencyProfile) -> f64 {
    // Iterate the smaller profile and probe the larger one
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut sum = 0.0;
    for (word, &count_small) in small {
        if let Some(&count_large) = large.get(word) {
            let weight = (word.chars().count() as f64).ln();
            sum += f64::from(count_small) * f64::from(count_large) * weight;
        }
    }
    sum
}
