//! Grant identifier input: flattening spreadsheet cells into a capped, deduplicated set.
//!
//! A cell may hold several comma-separated identifiers. Pieces are trimmed,
//! empty pieces dropped, and duplicates removed keeping first-seen order.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{InputError, InputResult};

/// Default name of the grant identifier column.
pub const DEFAULT_COLUMN: &str = "GrantID";

/// Distinct, trimmed grant identifiers in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantIdSet {
    ids: Vec<String>,
}

impl GrantIdSet {
    /// Flatten cells into a set, rejecting it if it exceeds `max` identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::TooManyGrantIds`] if more than `max` distinct
    /// identifiers are found.
    pub fn from_cells<I, S>(cells: I, max: usize) -> InputResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = flatten_cells(cells);
        if ids.len() > max {
            return Err(InputError::TooManyGrantIds { limit: max, found: ids.len() });
        }
        Ok(Self { ids })
    }

    /// Identifiers in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no identifier was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if `grant_id` is in the set.
    #[must_use]
    pub fn contains(&self, grant_id: &str) -> bool {
        self.ids.iter().any(|id| id == grant_id)
    }
}

/// Trim a manually entered grant identifier.
///
/// # Errors
///
/// Returns [`InputError::EmptyGrantId`] if the identifier is blank.
pub fn trim_grant_id(grant_id: &str) -> InputResult<&str> {
    let grant_id = grant_id.trim();
    if grant_id.is_empty() {
        return Err(InputError::EmptyGrantId);
    }
    Ok(grant_id)
}

/// Split, trim and deduplicate identifiers from cells, keeping first-seen order.
#[must_use]
pub fn flatten_cells<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for cell in cells {
        for piece in cell.as_ref().split(',') {
            let id = piece.trim();
            if !id.is_empty() && seen.insert(id.to_string()) {
                ids.push(id.to_string());
            }
        }
    }

    ids
}

/// Read the raw cells of `column` from CSV data with a header row.
///
/// Header names are matched after trimming. Rows too short to hold the
/// column contribute nothing.
///
/// # Errors
///
/// Returns [`InputError::MissingColumn`] if no header matches, or
/// [`InputError::Csv`] on malformed CSV.
pub fn read_column<R: Read>(reader: R, column: &str) -> InputResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let index = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| InputError::MissingColumn { column: column.to_string() })?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(index) {
            cells.push(cell.to_string());
        }
    }

    Ok(cells)
}

/// File extensions read as spreadsheets rather than CSV.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True if `path` names a spreadsheet workbook.
#[must_use]
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Read the raw cells of `column` from the first sheet of a workbook.
///
/// The first row of the sheet is the header row. Blank cells contribute
/// nothing; other cells are rendered as text (see [`cell_text`]).
///
/// # Errors
///
/// Returns [`InputError::MissingColumn`] if no header matches, or
/// [`InputError::Workbook`] if the file cannot be opened or has no sheet.
pub fn read_workbook_column(path: &Path, column: &str) -> InputResult<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(calamine::Error::Msg("workbook has no sheets"))??;

    let mut rows = range.rows();
    let index = rows
        .next()
        .and_then(|header| header.iter().position(|h| cell_text(h).as_deref() == Some(column)))
        .ok_or_else(|| InputError::MissingColumn { column: column.to_string() })?;

    Ok(rows.filter_map(|row| row.get(index).and_then(cell_text)).collect())
}

/// Text of a spreadsheet cell, or `None` for a blank cell.
///
/// Whole numbers lose their fractional part (`12345.0` reads as `"12345"`),
/// so numeric award identifiers match what OpenAlex stores. Booleans read as
/// `True`/`False`.
#[must_use]
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Load a capped grant identifier set from a CSV file or spreadsheet.
///
/// Files ending in `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods` are read as
/// workbooks; anything else as CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be read, lacks the column, or holds
/// more than `max` distinct identifiers.
pub fn load_grant_ids(path: &Path, column: &str, max: usize) -> InputResult<GrantIdSet> {
    let cells = if is_workbook(path) {
        read_workbook_column(path, column)?
    } else {
        read_column(File::open(path)?, column)?
    };
    let set = GrantIdSet::from_cells(&cells, max)?;

    tracing::info!(path = %path.display(), rows = cells.len(), grant_ids = set.len(), "Loaded grant IDs");
    Ok(set)
}
