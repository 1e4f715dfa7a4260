pub mod csv_import;
pub mod error;

pub use csv_import::CsvImporter;
pub use error::IngestError;
