// ============================================================
// DUPLICATE DETECTOR USE CASE
// ============================================================
// Mark every row whose full value tuple appears more than once

use std::collections::HashMap;

use crate::domain::table::Table;

/// Result of a duplicate scan over a table
#[derive(Debug, Clone)]
pub struct DuplicateScan {
    /// One entry per row, true when the row's full value tuple occurs
    /// two or more times anywhere in the table. The first occurrence of
    /// a repeated row is marked too; there is no "keep first" exemption.
    pub mask: Vec<bool>,

    /// The masked rows in their original relative order
    pub subset: Table,
}

impl DuplicateScan {
    pub fn has_duplicates(&self) -> bool {
        !self.subset.is_empty()
    }
}

/// Full-row duplicate detection
pub struct DuplicateDetector;

impl DuplicateDetector {
    pub fn new() -> Self {
        Self
    }

    /// Group rows by the ordered tuple of all column values and mark every
    /// member of a group of size >= 2. A table with no data rows yields an
    /// empty mask and empty subset.
    pub fn scan(&self, table: &Table) -> DuplicateScan {
        let mut groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (index, row) in table.rows.iter().enumerate() {
            let key: Vec<String> = row.iter().map(|cell| cell.key_token()).collect();
            groups.entry(key).or_default().push(index);
        }

        let mut mask = vec![false; table.row_count()];
        for indices in groups.values() {
            if indices.len() >= 2 {
                for &index in indices {
                    mask[index] = true;
                }
            }
        }

        let subset = table.select_rows(&mask);
        DuplicateScan { mask, subset }
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}
