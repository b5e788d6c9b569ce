//! Similarity scoring over term-frequency profiles.
//!
//! Two layers:
//! - `document_similarity`: the pairwise score between two profiles
//! - `DepartmentMatrix`: precomputed, normalized similarity between every
//!   pair of departments, used as a multiplicative weight during ranking

mod departments;
mod document;

pub use departments::{department_profiles, DepartmentMatrix};
pub use document::document_similarity;
