// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core value types for tabular data
// No I/O, no async, no external dependencies beyond serde

mod cell;
#[allow(clippy::module_inception)]
mod table;

pub use cell::{infer_column_type, CellValue, ColumnType};
pub use table::Table;
