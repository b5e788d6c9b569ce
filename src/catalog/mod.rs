//! Catalog ingestion: department file discovery, delimited-record parsing,
//! and cross-listing extraction.
//!
//! Everything here runs before the engine stages. Malformed input is handled
//! at this boundary - records that cannot be parsed are skipped with a
//! warning and never reach the ranking algorithm.

mod crosslist;
mod discovery;
mod parser;

pub use crosslist::{course_ids_in, CrossListIndex};
pub use discovery::find_catalog_files;
pub use parser::{parse_catalog, parse_department_text};
