pub mod csv_export;

pub use csv_export::{export_csv, write_csv, DEFAULT_CSV_FILENAME, HEADERS};
