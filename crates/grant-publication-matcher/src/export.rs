//! Result export: CSV (one row per publication) and JSON (grouped per grant/funder).

use std::io::Write;

use crate::error::ExportResult;
use crate::formatters::{OutputFormat, format_results_markdown};
use crate::models::ResultSet;

/// CSV header, in record field order.
pub const CSV_COLUMNS: [&str; 6] =
    ["doi", "title", "authors", "funder_display_name", "publication_year", "institutions"];

/// Write every publication record as a CSV row.
///
/// The header is written even when there are no records.
pub fn write_csv<W: Write>(results: &ResultSet, writer: W) -> ExportResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CSV_COLUMNS)?;
    for record in results.records() {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the results as a pretty-printed JSON array of grant/funder entries.
pub fn write_json<W: Write>(results: &ResultSet, mut writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the results in the requested format.
pub fn write_results<W: Write>(results: &ResultSet, format: OutputFormat, mut writer: W) -> ExportResult<()> {
    match format {
        OutputFormat::Csv => write_csv(results, writer),
        OutputFormat::Json => write_json(results, writer),
        OutputFormat::Markdown => {
            writer.write_all(format_results_markdown(results).as_bytes())?;
            Ok(())
        }
    }
}

/// Render the results as CSV text.
pub fn to_csv_string(results: &ResultSet) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_csv(results, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
