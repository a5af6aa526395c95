// ============================================================
// TABLE
// ============================================================
// Ordered rows over a fixed column schema, as read from the input

use serde::{Deserialize, Serialize};

use super::CellValue;

/// A parsed table: ordered column names and ordered rows of cells.
/// Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Table with the given schema and no data rows
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep the rows whose mask entry is true, preserving order.
    /// The mask must be parallel to the rows.
    pub fn select_rows(&self, mask: &[bool]) -> Table {
        let rows = self
            .rows
            .iter()
            .zip(mask.iter())
            .filter(|(_, &keep)| keep)
            .map(|(row, _)| row.clone())
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Int(1), CellValue::Int(2)],
                vec![CellValue::Int(3), CellValue::Int(4)],
                vec![CellValue::Int(5), CellValue::Missing],
            ],
        )
    }

    #[test]
    fn test_select_rows_preserves_order_and_schema() {
        let table = sample();
        let subset = table.select_rows(&[true, false, true]);

        assert_eq!(subset.columns, table.columns);
        assert_eq!(subset.row_count(), 2);
        assert_eq!(subset.rows[0], table.rows[0]);
        assert_eq!(subset.rows[1], table.rows[2]);
    }

    #[test]
    fn test_select_rows_all_false_yields_empty() {
        let subset = sample().select_rows(&[false, false, false]);
        assert!(subset.is_empty());
        assert_eq!(subset.column_count(), 2);
    }
}
