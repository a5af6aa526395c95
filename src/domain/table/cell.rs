// ============================================================
// CELL VALUES
// ============================================================
// Typed cell values with whole-column type inference

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed cell in a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// Empty cell; equal only to other missing cells
    Missing,
}

/// Inferred type for a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

impl CellValue {
    /// Build a cell from a raw string under the column's inferred type
    pub fn from_raw(raw: &str, column_type: ColumnType) -> Self {
        if raw.is_empty() {
            return CellValue::Missing;
        }
        match column_type {
            ColumnType::Int => match raw.parse::<i64>() {
                Ok(v) => CellValue::Int(v),
                Err(_) => CellValue::Text(raw.to_string()),
            },
            ColumnType::Float => match parse_finite_float(raw) {
                Some(v) => CellValue::Float(v),
                None => CellValue::Text(raw.to_string()),
            },
            ColumnType::Text => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Type-tagged token used when grouping rows by their full value tuple.
    /// The tag keeps Text("1") distinct from Int(1).
    pub fn key_token(&self) -> String {
        match self {
            CellValue::Int(v) => format!("i:{}", v),
            CellValue::Float(v) => format!("f:{}", v),
            CellValue::Text(v) => format!("s:{}", v),
            CellValue::Missing => "~".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            // Debug formatting keeps the decimal point on whole values
            // ("1.0", not "1"), so a Float column re-parses as Float
            CellValue::Float(v) => write!(f, "{:?}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Infer a column type from its raw values (empty cells are ignored).
/// A column is Int only if every value parses as i64, Float only if every
/// value parses as a finite f64, Text otherwise.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_float = true;

    for raw in values {
        if raw.is_empty() {
            continue;
        }
        saw_value = true;
        if all_int && raw.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && parse_finite_float(raw).is_none() {
            all_float = false;
        }
        if !all_int && !all_float {
            return ColumnType::Text;
        }
    }

    if !saw_value {
        // All-missing column; Text keeps values untouched either way
        return ColumnType::Text;
    }
    if all_int {
        ColumnType::Int
    } else if all_float {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

// Non-finite values stay textual so the JSON snapshot round-trips;
// -0.0 is folded into 0.0 so equal floats share one key token.
fn parse_finite_float(raw: &str) -> Option<f64> {
    let v = raw.parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(if v == 0.0 { 0.0 } else { v })
}
