//! Export the corrected signal to delimited text.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one `x,value` pair per line, scientific notation with seven
//! digits after the decimal point, and an optional leading `#` comment line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::FitError;

/// Write `(x, corrected)` pairs to a CSV file.
pub fn write_corrected_csv(
    path: &Path,
    x: &[f64],
    corrected: &[f64],
    comment: Option<&str>,
) -> Result<(), FitError> {
    if x.len() != corrected.len() {
        return Err(FitError::InvalidInput(format!(
            "Axis and corrected-signal lengths differ: {} vs {}.",
            x.len(),
            corrected.len()
        )));
    }

    let mut file = File::create(path)
        .map_err(|e| FitError::Io(format!("Failed to create CSV '{}': {e}", path.display())))?;

    if let Some(comment) = comment {
        writeln!(file, "# {comment}")
            .map_err(|e| FitError::Io(format!("Failed to write CSV comment: {e}")))?;
    }

    for (xi, vi) in x.iter().zip(corrected.iter()) {
        writeln!(file, "{xi:.7e},{vi:.7e}")
            .map_err(|e| FitError::Io(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}
