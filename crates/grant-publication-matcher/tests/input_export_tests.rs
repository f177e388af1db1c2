//! Input loading and export tests using files on disk.

use std::io::Write;

use grant_publication_matcher::export::{CSV_COLUMNS, write_results};
use grant_publication_matcher::formatters::OutputFormat;
use grant_publication_matcher::input::{DEFAULT_COLUMN, load_grant_ids};
use grant_publication_matcher::models::{FunderCandidate, PublicationRecord, PublicationYear, ResultSet};
use grant_publication_matcher::InputError;

fn csv_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_flattens_multi_id_cells() {
    let file = csv_file("Project,GrantID\nAlpha,\"G1, G2,G1\"\nBeta,G3\n");
    let set = load_grant_ids(file.path(), DEFAULT_COLUMN, 100).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["G1", "G2", "G3"]);
}

#[test]
fn test_load_missing_column() {
    let file = csv_file("Project,Award\nAlpha,G1\n");
    let err = load_grant_ids(file.path(), DEFAULT_COLUMN, 100).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn { ref column } if column == "GrantID"));
}

#[test]
fn test_load_custom_column() {
    let file = csv_file("Award\nDFF-1026-00123\n");
    let set = load_grant_ids(file.path(), "Award", 100).unwrap();
    assert!(set.contains("DFF-1026-00123"));
}

#[test]
fn test_load_rejects_over_cap() {
    let mut contents = String::from("GrantID\n");
    for i in 0..101 {
        contents.push_str(&format!("G{i}\n"));
    }
    let file = csv_file(&contents);

    let err = load_grant_ids(file.path(), DEFAULT_COLUMN, 100).unwrap_err();
    assert!(matches!(err, InputError::TooManyGrantIds { limit: 100, found: 101 }));
}

#[test]
fn test_load_nonexistent_file() {
    let err = load_grant_ids(std::path::Path::new("/nonexistent/grants.csv"), DEFAULT_COLUMN, 100)
        .unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}

/// Write a one-sheet workbook with a header row and the given rows.
fn workbook_file(headers: &[&str], rows: &[&[Cell]]) -> tempfile::TempPath {
    let path = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap().into_temp_path();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in (0u16..).zip(headers) {
        sheet.write_string(0, col, *header).unwrap();
    }
    for (row, cells) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells.iter()) {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col, *text).unwrap(),
                Cell::Number(number) => sheet.write_number(row, col, *number).unwrap(),
                Cell::Blank => continue,
            };
        }
    }
    workbook.save(&path).unwrap();
    path
}

enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

#[test]
fn test_load_workbook_matches_csv_cells() {
    let path = workbook_file(
        &["Project", "GrantID"],
        &[
            &[Cell::Text("Alpha"), Cell::Text("G1, G2")],
            &[Cell::Text("Beta"), Cell::Number(12345.0)],
            &[Cell::Text("Gamma"), Cell::Blank],
            &[Cell::Text("Delta"), Cell::Text(" G1 ")],
        ],
    );

    let set = load_grant_ids(&path, DEFAULT_COLUMN, 100).unwrap();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["G1", "G2", "12345"]);
}

#[test]
fn test_load_workbook_missing_column() {
    let path = workbook_file(&["Project", "Award"], &[&[Cell::Text("Alpha"), Cell::Text("G1")]]);
    let err = load_grant_ids(&path, DEFAULT_COLUMN, 100).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn { ref column } if column == "GrantID"));
}

#[test]
fn test_load_workbook_rejects_over_cap() {
    let numbers: Vec<[Cell; 1]> = (1..=101).map(|i| [Cell::Number(f64::from(i))]).collect();
    let rows: Vec<&[Cell]> = numbers.iter().map(|r| r.as_slice()).collect();
    let path = workbook_file(&["GrantID"], &rows);

    let err = load_grant_ids(&path, DEFAULT_COLUMN, 100).unwrap_err();
    assert!(matches!(err, InputError::TooManyGrantIds { limit: 100, found: 101 }));
}

#[test]
fn test_load_corrupt_workbook() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(b"GrantID\nG1\n").unwrap();
    file.flush().unwrap();

    let err = load_grant_ids(file.path(), DEFAULT_COLUMN, 100).unwrap_err();
    assert!(matches!(err, InputError::Workbook(_)));
}

#[test]
fn test_csv_export_to_file_reads_back() {
    let mut results = ResultSet::new();
    results.push(
        "G1",
        FunderCandidate::new("Independent Research Fund Denmark", "https://openalex.org/F1"),
        vec![PublicationRecord {
            doi: "N/A".to_string(),
            title: "Grants, funders, outputs".to_string(),
            authors: "Unknown, Jane Doe".to_string(),
            funder_display_name: "Independent Research Fund Denmark".to_string(),
            publication_year: PublicationYear::Unknown,
            institutions: "Aalborg University, Aarhus University".to_string(),
        }],
    );

    let out = tempfile::NamedTempFile::new().unwrap();
    write_results(&results, OutputFormat::Csv, out.reopen().unwrap()).unwrap();

    let mut reader = csv::Reader::from_path(out.path()).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_COLUMNS);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "Grants, funders, outputs");
    assert_eq!(&rows[0][4], "Unknown");
    assert_eq!(&rows[0][5], "Aalborg University, Aarhus University");
}
