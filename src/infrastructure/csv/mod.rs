// ============================================================
// CSV INFRASTRUCTURE
// ============================================================
// Reading uploaded CSV bytes and writing export bytes

mod reader;
mod writer;

pub use reader::CsvReader;
pub use writer::write_table;
