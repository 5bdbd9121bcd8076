//! Export the displayed records to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, so values are written raw (whole currency units, unscaled).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::FinancialRecord;
use crate::error::AppError;

/// Pick the export format from the file extension (`.json`, otherwise CSV).
pub fn write_records(path: &Path, records: &[FinancialRecord]) -> Result<(), AppError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        == Some(true);
    if is_json {
        write_records_json(path, records)
    } else {
        write_records_csv(path, records)
    }
}

/// Write records to a CSV file.
pub fn write_records_csv(path: &Path, records: &[FinancialRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "date,revenue,net_income,gross_profit,eps,operating_income")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in records {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            r.date, r.revenue, r.net_income, r.gross_profit, r.eps, r.operating_income,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    tracing::info!(path = %path.display(), n = records.len(), "wrote CSV export");
    Ok(())
}

/// Write records as a pretty JSON array using the source field names.
pub fn write_records_json(path: &Path, records: &[FinancialRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, records)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), n = records.len(), "wrote JSON export");
    Ok(())
}
