//! Report file writers.
//!
//! Spreadsheet output is preferred for `.xlsx` / `.xls` destinations; workbooks
//! are OOXML, so an `.xls` request is written to the `.xlsx` sibling. When the
//! spreadsheet cannot be produced (writer compiled out, render error, write
//! error), the same table is written as delimited text next to it, with the
//! extension replaced by `.csv`. Only a failed delimited write is an error.
//!
//! Every file is written atomically: render to memory, write a `.tmp`
//! sibling, fsync, rename. A failed spreadsheet write therefore never leaves a
//! truncated workbook behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::table::ReportTable;
use crate::errors::{CalcError, CalcResult};
use crate::session::{FieldValue, SessionRecord};
use crate::settings::ExportSettings;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Output format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Excel workbook
    Spreadsheet,
    /// Delimited text (CSV)
    Delimited,
}

impl ReportFormat {
    /// Format implied by a destination's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xls" => ReportFormat::Spreadsheet,
            _ => ReportFormat::Delimited,
        }
    }
}

/// What an export actually wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// File that was written
    pub path: PathBuf,
    pub format: ReportFormat,
    /// A spreadsheet was requested but delimited text was written instead
    pub fell_back: bool,
    /// Number of session rows written
    pub rows: usize,
}

/// Export sessions, with calculated columns, to `destination`.
///
/// # Errors
///
/// - `CalcError::NothingToExport` when `records` is empty (nothing is written)
/// - `CalcError::FileError` when the delimited write fails, including a
///   fallback after a failed spreadsheet write
pub fn export_report(records: &[SessionRecord], destination: &Path, settings: &ExportSettings) -> CalcResult<ExportOutcome> {
    if records.is_empty() {
        return Err(CalcError::NothingToExport);
    }
    settings.validate()?;

    let table = ReportTable::from_records(records);

    match ReportFormat::from_path(destination) {
        ReportFormat::Spreadsheet => {
            let workbook_path = spreadsheet_path(destination);
            match render_spreadsheet(&table, settings).and_then(|bytes| write_atomic(&workbook_path, &bytes)) {
                Ok(()) => {
                    tracing::info!(path = %workbook_path.display(), rows = table.row_count(), "spreadsheet report written");
                    Ok(ExportOutcome {
                        path: workbook_path,
                        format: ReportFormat::Spreadsheet,
                        fell_back: false,
                        rows: table.row_count(),
                    })
                }
                Err(e) => {
                    let fallback = destination.with_extension("csv");
                    tracing::warn!(
                        path = %destination.display(),
                        fallback = %fallback.display(),
                        error = %e,
                        "spreadsheet export failed, writing CSV instead"
                    );
                    write_delimited(&table, &fallback, settings)?;
                    Ok(ExportOutcome {
                        path: fallback,
                        format: ReportFormat::Delimited,
                        fell_back: true,
                        rows: table.row_count(),
                    })
                }
            }
        }
        ReportFormat::Delimited => {
            write_delimited(&table, destination, settings)?;
            Ok(ExportOutcome {
                path: destination.to_path_buf(),
                format: ReportFormat::Delimited,
                fell_back: false,
                rows: table.row_count(),
            })
        }
    }
}

/// Workbooks are always OOXML, so a legacy `.xls` request is written as `.xlsx`.
fn spreadsheet_path(destination: &Path) -> PathBuf {
    let legacy = destination
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("xls"));
    if legacy {
        destination.with_extension("xlsx")
    } else {
        destination.to_path_buf()
    }
}

fn write_delimited(table: &ReportTable, path: &Path, settings: &ExportSettings) -> CalcResult<()> {
    let bytes = render_delimited(table, settings)?;
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), rows = table.row_count(), "delimited report written");
    Ok(())
}

/// Render the table as delimited text.
pub fn render_delimited(table: &ReportTable, settings: &ExportSettings) -> CalcResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(settings.delimiter_byte())
        .from_writer(bom_prefix(settings));

    writer
        .write_record(&table.columns)
        .map_err(|e| CalcError::serialization(format!("CSV header: {e}")))?;

    for row in &table.rows {
        let cells = row.iter().map(|v| format_cell(v, settings.decimal_comma));
        writer
            .write_record(cells)
            .map_err(|e| CalcError::serialization(format!("CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| CalcError::serialization(format!("CSV flush: {e}")))
}

fn bom_prefix(settings: &ExportSettings) -> Vec<u8> {
    if settings.bom {
        UTF8_BOM.to_vec()
    } else {
        Vec::new()
    }
}

fn format_cell(value: &FieldValue, decimal_comma: bool) -> String {
    match value {
        FieldValue::Number(v) if decimal_comma => v.to_string().replace('.', ","),
        FieldValue::Number(v) => v.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Missing => String::new(),
    }
}

/// Render the table as an `.xlsx` workbook.
#[cfg(feature = "xlsx")]
pub fn render_spreadsheet(table: &ReportTable, settings: &ExportSettings) -> CalcResult<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook, XlsxError};

    fn xlsx_error(e: XlsxError) -> CalcError {
        CalcError::serialization(format!("Spreadsheet: {e}"))
    }

    fn cell_index<T: TryFrom<usize>>(index: usize, what: &str) -> CalcResult<T> {
        T::try_from(index).map_err(|_| CalcError::serialization(format!("Spreadsheet: too many {what}")))
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(settings.sheet_name.as_str()).map_err(xlsx_error)?;

    for (col, name) in table.columns.iter().enumerate() {
        let col: u16 = cell_index(col, "columns")?;
        sheet
            .write_string_with_format(0, col, name.as_str(), &header)
            .map_err(xlsx_error)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num: u32 = cell_index(row_idx + 1, "rows")?;
        for (col, value) in row.iter().enumerate() {
            let col: u16 = cell_index(col, "columns")?;
            match value {
                FieldValue::Number(v) => {
                    sheet.write_number(row_num, col, *v).map_err(xlsx_error)?;
                }
                FieldValue::Text(s) => {
                    sheet.write_string(row_num, col, s.as_str()).map_err(xlsx_error)?;
                }
                FieldValue::Missing => {}
            }
        }
    }

    if settings.autofit_columns {
        sheet.autofit();
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Spreadsheet support is compiled out; callers fall back to delimited text.
#[cfg(not(feature = "xlsx"))]
pub fn render_spreadsheet(_table: &ReportTable, _settings: &ExportSettings) -> CalcResult<Vec<u8>> {
    Err(CalcError::Internal {
        message: "spreadsheet export is not available in this build".to_string(),
    })
}

/// Temporary sibling used while writing `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Write bytes to `path` via a synced temporary file and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file.write_all(bytes).and_then(|_| tmp_file.sync_all());
    drop(tmp_file);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}
