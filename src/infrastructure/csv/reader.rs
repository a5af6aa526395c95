// ============================================================
// CSV READER
// ============================================================
// Parse uploaded CSV bytes into a Table with encoding fallback

use csv::ReaderBuilder;

use crate::domain::error::AppError;
use crate::domain::table::{infer_column_type, CellValue, ColumnType, Table};

/// CSV reader for uploaded files
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    /// Create a new CSV reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse raw upload bytes. The first row is the header row; every data
    /// row must have the same number of fields as the header.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Table, AppError> {
        let content = decode_text(bytes)?;
        self.read_str(&content)
    }

    /// Parse CSV content from a string
    pub fn read_str(&self, content: &str) -> Result<Table, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        if columns.is_empty() {
            return Err(AppError::ParseError(
                "No columns found: the file has no header row".to_string(),
            ));
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            raw_rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(build_table(columns, raw_rows))
    }
}

/// Infer a type per column over the whole table, then convert every cell
/// under its column's type. Empty cells become Missing.
fn build_table(columns: Vec<String>, raw_rows: Vec<Vec<String>>) -> Table {
    let column_types: Vec<ColumnType> = (0..columns.len())
        .map(|col| infer_column_type(raw_rows.iter().map(|row| row[col].as_str())))
        .collect();

    let rows = raw_rows
        .iter()
        .map(|raw| {
            raw.iter()
                .zip(column_types.iter())
                .map(|(value, &column_type)| CellValue::from_raw(value, column_type))
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

/// Decode upload bytes as text: strict UTF-8 first, Windows-1252 fallback.
/// NUL bytes mark the payload as non-text and fail fast.
fn decode_text(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.contains(&0) {
        return Err(AppError::ParseError(
            "File does not look like delimited text (binary content detected)".to_string(),
        ));
    }

    if let Ok(content) = std::str::from_utf8(bytes) {
        return Ok(content.trim_start_matches('\u{feff}').to_string());
    }

    let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    Ok(content.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let table = CsvReader::new().read_str("name,age\nAlice,30\nBob,25\n").unwrap();

        assert_eq!(table.columns, vec!["name", "age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], CellValue::Text("Alice".to_string()));
        assert_eq!(table.rows[0][1], CellValue::Int(30));
    }

    #[test]
    fn test_empty_file_fails_with_parse_error() {
        let err = CsvReader::new().read_bytes(b"").unwrap_err();
        match err {
            AppError::ParseError(msg) => assert!(msg.contains("No columns")),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_file_yields_empty_table() {
        let table = CsvReader::new().read_str("a,b\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_inconsistent_column_counts_fail() {
        let err = CsvReader::new().read_str("a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            AppError::ParseError(msg) => assert!(msg.contains("row 2")),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let result = CsvReader::new().read_str("a,b\n\"unterminated,2\n");
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_binary_content_fails() {
        let result = CsvReader::new().read_bytes(&[b'a', 0, b'b']);
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_mixed_column_stays_textual() {
        let table = CsvReader::new().read_str("v\n1\nx\n").unwrap();
        assert_eq!(table.rows[0][0], CellValue::Text("1".to_string()));
    }

    #[test]
    fn test_numeric_column_with_decimal_becomes_float() {
        let table = CsvReader::new().read_str("v\n1\n1.0\n").unwrap();
        assert_eq!(table.rows[0][0], CellValue::Float(1.0));
        assert_eq!(table.rows[1][0], CellValue::Float(1.0));
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let table = CsvReader::new().read_str("a,b\n1,\n,2\n").unwrap();
        assert_eq!(table.rows[0][1], CellValue::Missing);
        assert_eq!(table.rows[1][0], CellValue::Missing);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let table = CsvReader::new()
            .read_bytes("\u{feff}a,b\n1,2\n".as_bytes())
            .unwrap();
        assert_eq!(table.columns[0], "a");
    }

    #[test]
    fn test_latin1_fallback_decoding() {
        // "caf\xe9" is Windows-1252 for "café"
        let bytes = b"name\ncaf\xe9\n";
        let table = CsvReader::new().read_bytes(bytes).unwrap();
        assert_eq!(table.rows[0][0], CellValue::Text("café".to_string()));
    }
}
