//! Delimited-record parsing for department catalog files.
//!
//! The on-disk format is the FireRoad catalog dialect:
//! - the first line containing "Subject Id" is the header; anything before it
//!   is ignored
//! - each following line is one comma-delimited record
//! - fields may be wrapped in double quotes, with embedded quotes doubled
//!   (`""`) and embedded newlines written as the literal two characters `\n`
//! - subject ids may carry a `[J]` suffix marking a joint listing; the suffix
//!   is not part of the id
//!
//! Records that do not yield a usable subject id are skipped with a warning.
//! The ranking engine never sees malformed input.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{Catalog, CourseRecord};

/// Column headings consumed from catalog files. Other columns are ignored.
const SUBJECT_ID: &str = "Subject Id";
const TITLE: &str = "Subject Title";
const DESCRIPTION: &str = "Subject Description";
const EQUIVALENT_SUBJECTS: &str = "Equivalent Subjects";
const JOINT_SUBJECTS: &str = "Joint Subjects";
const MEETS_WITH_SUBJECTS: &str = "Meets With Subjects";

/// Parse every department file into one catalog.
///
/// Courses are grouped by the department derived from their id prefix, not
/// by source file; a file is welcome to contain courses from several
/// departments.
pub fn parse_catalog(files: &[PathBuf]) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for file in files {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read catalog file {}", file.display()))?;
        parse_department_text(&text, &mut catalog, file);
    }

    Ok(catalog)
}

/// Parse one file's text into the catalog.
pub fn parse_department_text(text: &str, catalog: &mut Catalog, source: &Path) {
    let mut headers: Option<Vec<String>> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_record(line);

        if let Some(columns) = &headers {
            match build_record(columns, &fields) {
                Some(record) => {
                    catalog
                        .entry(record.department().to_string())
                        .or_default()
                        .insert(record.subject_id.clone(), record);
                }
                None => {
                    eprintln!(
                        "⚠️  Skipping record without a subject id in {}",
                        source.display()
                    );
                }
            }
        } else if fields.iter().any(|f| f == SUBJECT_ID) {
            headers = Some(fields);
        }
    }

    if headers.is_none() {
        eprintln!(
            "⚠️  No \"{}\" header found in {}; file ignored",
            SUBJECT_ID,
            source.display()
        );
    }
}

/// Split one record line into fields.
///
/// Comma-delimited with double-quote quoting and quote-doubling. Fields are
/// trimmed, and escaped newlines are restored as spaces so they read as word
/// separators downstream.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted field
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(finish_field(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(finish_field(&current));

    fields
}

fn finish_field(raw: &str) -> String {
    raw.trim().replace("\\n", " ")
}

/// Map a split record onto a `CourseRecord` using the header columns.
///
/// Returns `None` when the record carries no usable subject id.
fn build_record(columns: &[String], fields: &[String]) -> Option<CourseRecord> {
    let mut record = CourseRecord::default();

    for (column, value) in columns.iter().zip(fields) {
        match column.as_str() {
            SUBJECT_ID => record.subject_id = strip_joint_suffix(value).to_string(),
            TITLE => record.title = value.clone(),
            DESCRIPTION => record.description = value.clone(),
            EQUIVALENT_SUBJECTS => record.equivalent_subjects = value.clone(),
            JOINT_SUBJECTS => record.joint_subjects = value.clone(),
            MEETS_WITH_SUBJECTS => record.meets_with_subjects = value.clone(),
            _ => {}
        }
    }

    if record.subject_id.is_empty() || !record.subject_id.contains('.') {
        return None;
    }
    Some(record)
}

/// `[J]` marks a joint listing and is not part of the subject id.
pub fn strip_joint_suffix(subject_id: &str) -> &str {
    subject_id.trim().trim_end_matches("[J]").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::lookup;

    const HEADER: &str =
        "Subject Id,Subject Title,Subject Description,Equivalent Subjects,Joint Subjects,Meets With Subjects";

    fn parse(text: &str) -> Catalog {
        let mut catalog = Catalog::new();
        parse_department_text(text, &mut catalog, Path::new("test.txt"));
        catalog
    }

    #[test]
    fn test_basic_record() {
        let text = format!(
            "{HEADER}\n6.006,\"Introduction to Algorithms\",\"Sorting, searching, graphs\",,,"
        );
        let catalog = parse(&text);

        let record = lookup(&catalog, "6.006").expect("course parsed");
        assert_eq!(record.title, "Introduction to Algorithms");
        assert_eq!(record.description, "Sorting, searching, graphs");
        assert_eq!(record.department(), "6");
    }

    #[test]
    fn test_quote_doubling_and_escaped_newlines() {
        let text = format!("{HEADER}\n18.03,\"ODEs\",\"The \"\"standard\"\" course.\\nCovers linear systems\",,,");
        let catalog = parse(&text);

        let record = lookup(&catalog, "18.03").expect("course parsed");
        assert_eq!(
            record.description,
            "The \"standard\" course. Covers linear systems"
        );
    }

    #[test]
    fn test_joint_suffix_stripped() {
        let text = format!("{HEADER}\n6.831[J],\"UI Design\",\"Interfaces\",,\"8.371[J]\",");
        let catalog = parse(&text);

        assert!(lookup(&catalog, "6.831").is_some());
        assert!(lookup(&catalog, "6.831[J]").is_none());
        // Cross-reference fields stay raw; CrossListIndex handles their ids
        assert_eq!(
            lookup(&catalog, "6.831").map(|r| r.joint_subjects.as_str()),
            Some("8.371[J]")
        );
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let text = format!("{HEADER}\n,\"No id here\",\"desc\",,,\nnodot,\"Bad id\",\"desc\",,,\n6.006,\"Algorithms\",\"desc\",,,");
        let catalog = parse(&text);

        assert_eq!(crate::types::course_count(&catalog), 1);
        assert!(lookup(&catalog, "6.006").is_some());
    }

    #[test]
    fn test_preamble_before_header_is_ignored() {
        let text = format!("generated 2024-05-01\nsource: catalog\n{HEADER}\n6.006,\"Algorithms\",\"desc\",,,");
        let catalog = parse(&text);
        assert!(lookup(&catalog, "6.006").is_some());
    }

    #[test]
    fn test_file_without_header_yields_nothing() {
        let catalog = parse("6.006,\"Algorithms\",\"desc\",,,");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_courses_group_by_id_prefix_not_source_file() {
        // One file carrying two departments
        let text = format!("{HEADER}\n6.006,\"Algorithms\",\"desc\",,,\n18.410,\"Algorithms\",\"desc\",,,");
        let catalog = parse(&text);

        assert!(catalog.contains_key("6"));
        assert!(catalog.contains_key("18"));
        assert_eq!(catalog["6"].len(), 1);
        assert_eq!(catalog["18"].len(), 1);
    }

    #[test]
    fn test_split_record_plain_fields() {
        assert_eq!(
            split_record("6.006,Algorithms,,x"),
            vec!["6.006", "Algorithms", "", "x"]
        );
    }

    #[test]
    fn test_strip_joint_suffix() {
        assert_eq!(strip_joint_suffix("6.831[J]"), "6.831");
        assert_eq!(strip_joint_suffix(" 6.831 "), "6.831");
        assert_eq!(strip_joint_suffix("6.831"), "6.831");
    }
}
