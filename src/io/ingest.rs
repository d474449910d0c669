//! CSV ingest.
//!
//! Turns delimited text into a clean `Spectrum` (plus an optional validity
//! mask) that is safe to fit.
//!
//! Design goals:
//! - **Column-indexed addressing** (1-based x/y/mask columns, configurable
//!   header-row count) so files without meaningful headers load fine
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::path::Path;

use crate::domain::Spectrum;
use crate::error::FitError;

/// Which columns of the file hold the spectrum.
///
/// Columns are 1-based, matching how spreadsheet users count them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// 1-based column of the axis values.
    pub x_column: usize,
    /// 1-based column of the signal values.
    pub y_column: usize,
    /// Optional 1-based column of the validity mask (`0/1/true/false`).
    pub mask_column: Option<usize>,
    /// Number of leading rows to skip before data starts.
    pub header_rows: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            x_column: 1,
            y_column: 2,
            mask_column: None,
            header_rows: 1,
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: spectrum + optional mask + row diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedSpectrum {
    pub spectrum: Spectrum,
    pub mask: Option<Vec<bool>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a spectrum from a delimited file using the given column layout.
///
/// Rows that fail to parse are skipped and reported in `row_errors`; only a
/// file-level failure (or an invalid layout) is fatal.
pub fn load_spectrum(path: &Path, layout: &ColumnLayout) -> Result<IngestedSpectrum, FitError> {
    validate_layout(layout)?;

    let file = File::open(path)
        .map_err(|e| FitError::Io(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut mask = layout.mask_column.map(|_| Vec::new());
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // CSV lines are 1-based.
        let line = idx + 1;
        if idx < layout.header_rows {
            continue;
        }
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let xi = match parse_number(&record, layout.x_column, "x") {
            Ok(v) => v,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };
        let yi = match parse_number(&record, layout.y_column, "y") {
            Ok(v) => v,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };
        let mi = match layout.mask_column {
            Some(col) => match parse_flag(&record, col) {
                Ok(v) => Some(v),
                Err(message) => {
                    row_errors.push(RowError { line, message });
                    continue;
                }
            },
            None => None,
        };

        x.push(xi);
        y.push(yi);
        if let (Some(mask), Some(mi)) = (mask.as_mut(), mi) {
            mask.push(mi);
        }
    }

    let rows_used = x.len();
    Ok(IngestedSpectrum {
        spectrum: Spectrum { x, y },
        mask,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn validate_layout(layout: &ColumnLayout) -> Result<(), FitError> {
    if layout.x_column == 0 || layout.y_column == 0 {
        return Err(FitError::InvalidInput(
            "Column indices are 1-based; 0 is not a valid column.".to_string(),
        ));
    }
    if layout.x_column == layout.y_column {
        return Err(FitError::InvalidInput(
            "x and y cannot come from the same column.".to_string(),
        ));
    }
    if layout.mask_column == Some(0) {
        return Err(FitError::InvalidInput(
            "Column indices are 1-based; 0 is not a valid mask column.".to_string(),
        ));
    }
    Ok(())
}

fn parse_number(record: &csv::StringRecord, column: usize, label: &str) -> Result<f64, String> {
    let cell = record
        .get(column - 1)
        .ok_or_else(|| format!("Row has no column {column} for {label}."))?;
    cell.parse::<f64>()
        .map_err(|_| format!("Column {column} ({label}) is not a number: '{cell}'."))
}

fn parse_flag(record: &csv::StringRecord, column: usize) -> Result<bool, String> {
    let cell = record
        .get(column - 1)
        .ok_or_else(|| format!("Row has no column {column} for the mask."))?;
    match cell.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("Column {column} (mask) is not a 0/1 flag: '{other}'.")),
    }
}
