// ============================================================
// CSV WRITER
// ============================================================
// Serialize a Table back to comma-delimited UTF-8 bytes

use crate::domain::error::AppError;
use crate::domain::table::Table;

/// Write a table as CSV: header row first, one record per row, no index
/// column. Missing cells serialize as empty fields.
pub fn write_table(table: &Table) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&table.columns)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for row in &table.rows {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))
}
