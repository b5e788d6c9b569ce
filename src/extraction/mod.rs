//! Term-frequency extraction from course descriptions.
//!
//! This is the first engine stage: every course description becomes a
//! word-frequency profile, and those profiles are the only thing the
//! similarity and ranking stages ever look at.

mod tokenizer;

pub use tokenizer::{course_profiles, term_frequencies, TermFrequencyProfile};
