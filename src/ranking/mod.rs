//! Relatedness ranking - from profiles to each course's nearest neighbors.
//!
//! The ranker combines:
//! - document similarity between course profiles
//! - the precomputed department similarity matrix as a multiplicative weight
//! - a fixed-size slate with cross-listing conflict rejection

mod ranker;
mod slate;

pub use ranker::RelatednessRanker;
pub use slate::Slate;
